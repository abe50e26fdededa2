//! Discipline policy (红黄牌停赛规则参数)

use serde::{Deserialize, Serialize};

/// Numeric rules applied by the rule engine.
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | ACCUMULATION_THRESHOLD | 3 | 累计黄牌停赛阈值 |
/// | RED_CARD_BAN | 1 | 直接红牌停赛场次 |
/// | SECOND_YELLOW_BAN | 1 | 两黄变一红停赛场次 |
/// | ACCUMULATION_BAN | 1 | 累计黄牌停赛场次 |
///
/// A recalculation always applies the policy currently loaded, so changing a
/// value and recalculating rewrites the season retroactively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisciplinePolicy {
    pub accumulation_threshold: u32,
    pub red_card_ban: u32,
    pub second_yellow_ban: u32,
    pub accumulation_ban: u32,
}

impl Default for DisciplinePolicy {
    fn default() -> Self {
        Self {
            accumulation_threshold: 3,
            red_card_ban: 1,
            second_yellow_ban: 1,
            accumulation_ban: 1,
        }
    }
}

impl DisciplinePolicy {
    /// 从环境变量加载，非法值 (0 或无法解析) 回退到默认值
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            accumulation_threshold: positive_var(
                "ACCUMULATION_THRESHOLD",
                defaults.accumulation_threshold,
            ),
            red_card_ban: positive_var("RED_CARD_BAN", defaults.red_card_ban),
            second_yellow_ban: positive_var("SECOND_YELLOW_BAN", defaults.second_yellow_ban),
            accumulation_ban: positive_var("ACCUMULATION_BAN", defaults.accumulation_ban),
        }
    }
}

fn positive_var(name: &str, default: u32) -> u32 {
    match std::env::var(name) {
        Ok(raw) => parse_positive(&raw).unwrap_or_else(|| {
            tracing::warn!(var = name, value = %raw, default, "Invalid policy value, using default");
            default
        }),
        Err(_) => default,
    }
}

fn parse_positive(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_policy() {
        let policy = DisciplinePolicy::default();
        assert_eq!(policy.accumulation_threshold, 3);
        assert_eq!(policy.red_card_ban, 1);
        assert_eq!(policy.second_yellow_ban, 1);
        assert_eq!(policy.accumulation_ban, 1);
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("5"), Some(5));
        assert_eq!(parse_positive(" 2 "), Some(2));
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-1"), None);
        assert_eq!(parse_positive("three"), None);
    }
}
