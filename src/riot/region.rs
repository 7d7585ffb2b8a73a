use std::collections::HashMap;

use lazy_static::lazy_static;

/// Routing hosts for one platform region.
///
/// Account and match endpoints live on the continental cluster
/// (`account_host`), summoner and league endpoints on the platform
/// itself (`platform_host`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub code: &'static str,
    pub account_host: &'static str,
    pub platform_host: &'static str,
}

impl Region {
    /// Look up a platform code. Unknown codes are an error for the
    /// caller to surface, never a silent default.
    pub fn from_code(code: &str) -> Option<Region> {
        REGIONS.get(code.to_ascii_lowercase().as_str()).copied()
    }

    pub fn account_base(&self) -> String {
        format!("https://{}.api.riotgames.com", self.account_host)
    }

    pub fn platform_base(&self) -> String {
        format!("https://{}.api.riotgames.com", self.platform_host)
    }
}

const fn region(code: &'static str, account_host: &'static str) -> Region {
    Region {
        code,
        account_host,
        platform_host: code,
    }
}

lazy_static! {
    static ref REGIONS: HashMap<&'static str, Region> = {
        let mut map = HashMap::new();
        for r in [
            // Americas
            region("na1", "americas"),
            region("br1", "americas"),
            region("la1", "americas"),
            region("la2", "americas"),
            // Europe
            region("euw1", "europe"),
            region("eun1", "europe"),
            region("tr1", "europe"),
            region("ru1", "europe"),
            region("me1", "europe"),
            // Asia
            region("kr", "asia"),
            region("jp1", "asia"),
            // South-east Asia
            region("oc1", "sea"),
            region("ph2", "sea"),
            region("sg2", "sea"),
            region("th2", "sea"),
            region("tw2", "sea"),
            region("vn2", "sea"),
        ] {
            map.insert(r.code, r);
        }
        map
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        let euw = Region::from_code("euw1").unwrap();
        assert_eq!(euw.account_host, "europe");
        assert_eq!(euw.platform_host, "euw1");

        let kr = Region::from_code("kr").unwrap();
        assert_eq!(kr.account_host, "asia");
        assert_eq!(kr.platform_host, "kr");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Region::from_code("NA1"), Region::from_code("na1"));
        assert!(Region::from_code("NA1").is_some());
    }

    #[test]
    fn unknown_code_fails_closed() {
        assert!(Region::from_code("atlantis").is_none());
        assert!(Region::from_code("").is_none());
    }

    #[test]
    fn hosts_build_full_base_urls() {
        let na = Region::from_code("na1").unwrap();
        assert_eq!(na.account_base(), "https://americas.api.riotgames.com");
        assert_eq!(na.platform_base(), "https://na1.api.riotgames.com");
    }
}
