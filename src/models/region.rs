use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regions the load balancer can be provisioned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Region {
    Beijing,
    Nanjing,
    Shanghai,
    Guangzhou,
    Chengdu,
    Chongqing,
    HongKong,
    Singapore,
    Seoul,
    Bangkok,
    Tokyo,
    Qingyuan,
    SiliconValley,
    Ashburn,
    Frankfurt,
}

impl Region {
    pub const ALL: [Region; 15] = [
        Region::Beijing,
        Region::Nanjing,
        Region::Shanghai,
        Region::Guangzhou,
        Region::Chengdu,
        Region::Chongqing,
        Region::HongKong,
        Region::Singapore,
        Region::Seoul,
        Region::Bangkok,
        Region::Tokyo,
        Region::Qingyuan,
        Region::SiliconValley,
        Region::Ashburn,
        Region::Frankfurt,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Region::Beijing => "ap-beijing",
            Region::Nanjing => "ap-nanjing",
            Region::Shanghai => "ap-shanghai",
            Region::Guangzhou => "ap-guangzhou",
            Region::Chengdu => "ap-chengdu",
            Region::Chongqing => "ap-chongqing",
            Region::HongKong => "ap-hongkong",
            Region::Singapore => "ap-singapore",
            Region::Seoul => "ap-seoul",
            Region::Bangkok => "ap-bangkok",
            Region::Tokyo => "ap-tokyo",
            Region::Qingyuan => "ap-qingyuan",
            Region::SiliconValley => "na-siliconvalley",
            Region::Ashburn => "na-ashburn",
            Region::Frankfurt => "eu-frankfurt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::Beijing => "North China (Beijing)",
            Region::Nanjing => "East China (Nanjing)",
            Region::Shanghai => "East China (Shanghai)",
            Region::Guangzhou => "South China (Guangzhou)",
            Region::Chengdu => "Southwest China (Chengdu)",
            Region::Chongqing => "Southwest China (Chongqing)",
            Region::HongKong => "Hong Kong, China",
            Region::Singapore => "Southeast Asia (Singapore)",
            Region::Seoul => "Northeast Asia (Seoul)",
            Region::Bangkok => "Southeast Asia (Bangkok)",
            Region::Tokyo => "Northeast Asia (Tokyo)",
            Region::Qingyuan => "South China (Qingyuan)",
            Region::SiliconValley => "US West (Silicon Valley)",
            Region::Ashburn => "US East (Virginia)",
            Region::Frankfurt => "Europe (Frankfurt)",
        }
    }

    pub fn from_code(code: &str) -> Option<Region> {
        let code = code.trim();
        Region::ALL.iter().copied().find(|r| r.code() == code)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::from_code(s).ok_or_else(|| format!("unknown region code: {}", s.trim()))
    }
}

impl TryFrom<String> for Region {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.code().to_string()
    }
}

/// Region entry as exposed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct RegionOption {
    pub code: &'static str,
    pub label: &'static str,
}

pub fn region_catalog() -> Vec<RegionOption> {
    Region::ALL
        .iter()
        .map(|r| RegionOption {
            code: r.code(),
            label: r.label(),
        })
        .collect()
}
