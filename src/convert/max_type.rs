//! Name-based data type inference.
//!
//! The type is guessed from the column name alone, by an ordered rule
//! table. Order matters: amount-like names win over everything, and the
//! DATETIME rule must run before the DATE rule.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Target platform data type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum MaxType {
    /// Generic alphanumeric.
    #[default]
    Aln,
    Amount,
    Date,
    DateTime,
    /// Yes/no boolean.
    Yorn,
    Integer,
}

impl MaxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aln => "ALN",
            Self::Amount => "AMOUNT",
            Self::Date => "DATE",
            Self::DateTime => "DATETIME",
            Self::Yorn => "YORN",
            Self::Integer => "INTEGER",
        }
    }
}

impl std::fmt::Display for MaxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inference rule: a predicate over the upper-cased name.
pub struct NameRule {
    pub matches: fn(&str) -> bool,
    pub max_type: MaxType,
}

/// Rules in evaluation order; the first match wins.
pub const MAX_TYPE_RULES: &[NameRule] = &[
    NameRule {
        matches: is_amount_name,
        max_type: MaxType::Amount,
    },
    NameRule {
        matches: is_datetime_name,
        max_type: MaxType::DateTime,
    },
    NameRule {
        matches: is_date_name,
        max_type: MaxType::Date,
    },
    NameRule {
        matches: is_yes_no_name,
        max_type: MaxType::Yorn,
    },
    NameRule {
        matches: is_count_name,
        max_type: MaxType::Integer,
    },
];

/// Infer the data type of a field from its name (case-insensitive).
pub fn infer_max_type(name: &str) -> MaxType {
    let upper = name.trim().to_ascii_uppercase();
    MAX_TYPE_RULES
        .iter()
        .find(|rule| (rule.matches)(&upper))
        .map_or(MaxType::Aln, |rule| rule.max_type)
}

fn is_amount_name(name: &str) -> bool {
    ["AMT", "AMOUNT", "PRICE", "COST"]
        .iter()
        .any(|s| name.contains(s))
}

fn is_datetime_name(name: &str) -> bool {
    name == "DATETIME"
        || ["_DATETIME", "_TIME", "_TIMESTAMP"]
            .iter()
            .any(|s| name.ends_with(s))
}

fn is_date_name(name: &str) -> bool {
    name == "DATE" || name.ends_with("_DATE")
}

fn is_yes_no_name(name: &str) -> bool {
    name == "FLAG"
        || name.ends_with("_YN")
        || name.ends_with("_FLAG")
        || name.starts_with("IS_")
        || name.starts_with("HAS_")
}

fn is_count_name(name: &str) -> bool {
    matches!(name, "QTY" | "COUNT" | "SEQ")
        || ["_QTY", "_NUM", "_COUNT", "_SEQ"]
            .iter()
            .any(|s| name.ends_with(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("CREATE_DATETIME", MaxType::DateTime)]
    #[case("CREATE_DATE", MaxType::Date)]
    #[case("DATE", MaxType::Date)]
    #[case("DATETIME", MaxType::DateTime)]
    #[case("START_TIME", MaxType::DateTime)]
    #[case("LAST_TIMESTAMP", MaxType::DateTime)]
    #[case("TOTAL_AMOUNT", MaxType::Amount)]
    #[case("UNIT_PRICE", MaxType::Amount)]
    #[case("COST_DATE", MaxType::Amount)]
    #[case("USE_YN", MaxType::Yorn)]
    #[case("DEL_FLAG", MaxType::Yorn)]
    #[case("IS_ACTIVE", MaxType::Yorn)]
    #[case("HAS_CHILD", MaxType::Yorn)]
    #[case("FLAG", MaxType::Yorn)]
    #[case("ORDER_QTY", MaxType::Integer)]
    #[case("SLIP_NUM", MaxType::Integer)]
    #[case("LINE_SEQ", MaxType::Integer)]
    #[case("COUNT", MaxType::Integer)]
    #[case("SLIP_NO", MaxType::Aln)]
    #[case("DESCRIPTION", MaxType::Aln)]
    fn test_infer_max_type(#[case] name: &str, #[case] expected: MaxType) {
        assert_eq!(infer_max_type(name), expected);
    }

    #[test]
    fn test_infer_max_type_is_case_insensitive() {
        assert_eq!(infer_max_type("total_amount"), infer_max_type("TOTAL_AMOUNT"));
        assert_eq!(infer_max_type("create_datetime"), MaxType::DateTime);
    }

    #[test]
    fn test_datetime_rule_precedes_date_rule() {
        let datetime = MAX_TYPE_RULES
            .iter()
            .position(|r| r.max_type == MaxType::DateTime);
        let date = MAX_TYPE_RULES.iter().position(|r| r.max_type == MaxType::Date);
        assert!(datetime < date);
    }
}
