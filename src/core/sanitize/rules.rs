//! Ordered per-line rewrite rules.
//!
//! Each rule is a pure `&str -> String` step over one line (no terminator).
//! Keyword-driven rules read their compiled patterns from [`Patterns`], so
//! every rule can be exercised on its own with any keyword set.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::keywords::Keywords;
use super::title_case::title_case;
use crate::error::{Error, Result};

/// Mis-decoded right single quotation mark (UTF-8 read as Windows-1252).
pub const MOJIBAKE_APOSTROPHE: &str = "\u{e2}\u{20ac}\u{2122}";

static RARITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:\s+[UR]\b[\s,]*)+$").unwrap());

static TRAILING_COMMA_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,[\s,]*$").unwrap());

static BONUS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+(\d+)(?:\s+|$)").unwrap());

/// Keyword patterns compiled from a [`Keywords`] value. An empty set leaves
/// its pattern unset and the matching rule becomes a no-op.
#[derive(Debug, Clone)]
pub struct Patterns {
    category: Option<Regex>,
    grade: Option<Regex>,
    item_type: Option<Regex>,
    coarse_grade: Option<Regex>,
}

impl Patterns {
    pub fn compile(keywords: &Keywords) -> Result<Self> {
        Ok(Self {
            category: compile_set("categories", &keywords.categories, |alt| {
                format!(r"(?i)\b(?:{})\b", alt)
            })?,
            grade: compile_set("grades", &keywords.grades, |alt| {
                format!(r"(?i),\s*({})[\s,]*$", alt)
            })?,
            item_type: compile_set("item_types", &keywords.item_types, |alt| {
                format!(r"(?i),\s*({})\b", alt)
            })?,
            coarse_grade: compile_set("coarse_grades", &keywords.coarse_grades, |alt| {
                format!(r"(?i),\s*({})\b", alt)
            })?,
        })
    }
}

fn compile_set(
    key: &str,
    words: &[String],
    wrap: impl Fn(&str) -> String,
) -> Result<Option<Regex>> {
    let mut escaped: Vec<String> = words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty())
        .map(regex::escape)
        .collect();
    if escaped.is_empty() {
        return Ok(None);
    }
    // Longest first so "Type III" wins over "Type I".
    escaped.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    Regex::new(&wrap(&escaped.join("|")))
        .map(Some)
        .map_err(|e| {
            Error::config_invalid_value(
                format!("keywords.{}", key),
                None,
                format!("Cannot build keyword pattern: {}", e),
            )
        })
}

pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&str, &Patterns) -> String,
}

/// Rules in application order.
pub const RULES: &[Rule] = &[
    Rule {
        name: "category",
        apply: truncate_at_category,
    },
    Rule {
        name: "apostrophe",
        apply: fix_apostrophe,
    },
    Rule {
        name: "rarity",
        apply: strip_rarity,
    },
    Rule {
        name: "grade",
        apply: grade_to_parenthetical,
    },
    Rule {
        name: "item_type",
        apply: item_type_to_parenthetical,
    },
    Rule {
        name: "coarse_grade",
        apply: coarse_grade_to_parenthetical,
    },
    Rule {
        name: "trailing_comma",
        apply: drop_trailing_comma,
    },
    Rule {
        name: "bonus",
        apply: bonus_to_parenthetical,
    },
    Rule {
        name: "commas",
        apply: remove_commas,
    },
    Rule {
        name: "title_case",
        apply: apply_title_case,
    },
];

pub fn truncate_at_category(line: &str, patterns: &Patterns) -> String {
    let Some(re) = &patterns.category else {
        return line.to_string();
    };
    match re.find_iter(line).find(|m| m.start() > 0) {
        Some(m) => line[..m.start()].to_string(),
        None => line.to_string(),
    }
}

pub fn fix_apostrophe(line: &str, _: &Patterns) -> String {
    line.replace(MOJIBAKE_APOSTROPHE, "'")
}

pub fn strip_rarity(line: &str, _: &Patterns) -> String {
    RARITY_PATTERN.replace(line, "").into_owned()
}

pub fn grade_to_parenthetical(line: &str, patterns: &Patterns) -> String {
    let Some(re) = &patterns.grade else {
        return line.to_string();
    };
    re.replace(line, |caps: &Captures| format!(" ({})", &caps[1]))
        .into_owned()
}

pub fn item_type_to_parenthetical(line: &str, patterns: &Patterns) -> String {
    move_to_parenthetical(line, patterns.item_type.as_ref())
}

pub fn coarse_grade_to_parenthetical(line: &str, patterns: &Patterns) -> String {
    move_to_parenthetical(line, patterns.coarse_grade.as_ref())
}

/// Cut `, keyword` out of the line and append it as ` (keyword)`.
fn move_to_parenthetical(line: &str, re: Option<&Regex>) -> String {
    let Some(caps) = re.and_then(|re| re.captures(line)) else {
        return line.to_string();
    };
    let (Some(whole), Some(keyword)) = (caps.get(0), caps.get(1)) else {
        return line.to_string();
    };

    let rest = format!("{}{}", &line[..whole.start()], &line[whole.end()..]);
    format!("{} ({})", rest.trim_end(), keyword.as_str())
}

pub fn drop_trailing_comma(line: &str, _: &Patterns) -> String {
    TRAILING_COMMA_PATTERN.replace(line, "").into_owned()
}

/// Move every leading `+N` to the end as ` (+N)`, in their original order.
/// A line made only of bonuses is left alone.
pub fn bonus_to_parenthetical(line: &str, _: &Patterns) -> String {
    let mut rest = line.trim();
    let mut bonuses = Vec::new();
    while let Some(caps) = BONUS_TOKEN.captures(rest) {
        let (Some(whole), Some(value)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        bonuses.push(format!("(+{})", value.as_str()));
        rest = &rest[whole.end()..];
    }

    if bonuses.is_empty() || rest.is_empty() {
        return line.to_string();
    }
    format!("{} {}", rest.trim_end(), bonuses.join(" "))
}

pub fn remove_commas(line: &str, _: &Patterns) -> String {
    line.replace(',', "")
}

pub fn apply_title_case(line: &str, _: &Patterns) -> String {
    title_case(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> Patterns {
        Patterns::compile(&Keywords::default()).unwrap()
    }

    #[test]
    fn rules_run_in_documented_order() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "category",
                "apostrophe",
                "rarity",
                "grade",
                "item_type",
                "coarse_grade",
                "trailing_comma",
                "bonus",
                "commas",
                "title_case",
            ]
        );
    }

    #[test]
    fn category_truncates_after_start_only() {
        let p = patterns();
        assert_eq!(truncate_at_category("Flaming Rune 8 Magical", &p), "Flaming ");
        assert_eq!(truncate_at_category("Potion of Flying", &p), "Potion of Flying");
        assert_eq!(truncate_at_category("Oil of Potency Oil 2", &p), "Oil of Potency ");
    }

    #[test]
    fn category_needs_whole_word() {
        let p = patterns();
        assert_eq!(truncate_at_category("Wandering Eye", &p), "Wandering Eye");
        assert_eq!(truncate_at_category("Bombast Horn", &p), "Bombast Horn");
    }

    #[test]
    fn category_match_ignores_case() {
        let p = patterns();
        // Lowercase category words cut too, hyphenated compounds included.
        assert_eq!(truncate_at_category("Hand-held Mirror", &p), "Hand-");
        assert_eq!(truncate_at_category("Ring worn Invested", &p), "Ring ");
        assert_eq!(sanitize_all("Hand-held Mirror", &p), "Hand-");
    }

    fn sanitize_all(line: &str, p: &Patterns) -> String {
        RULES.iter().fold(line.to_string(), |acc, rule| (rule.apply)(&acc, p))
    }

    #[test]
    fn category_rule_is_noop_without_categories() {
        let keywords = Keywords {
            categories: Vec::new(),
            ..Keywords::default()
        };
        let p = Patterns::compile(&keywords).unwrap();
        assert_eq!(truncate_at_category("Healing Potion", &p), "Healing Potion");
    }

    #[test]
    fn apostrophe_is_repaired() {
        let line = format!("Alchemist{}s Fire", MOJIBAKE_APOSTROPHE);
        assert_eq!(fix_apostrophe(&line, &patterns()), "Alchemist's Fire");
    }

    #[test]
    fn rarity_marker_stripped_from_end() {
        let p = patterns();
        assert_eq!(strip_rarity("Sun Orchid Elixir U", &p), "Sun Orchid Elixir");
        assert_eq!(strip_rarity("Cube of Force R ", &p), "Cube of Force");
        assert_eq!(strip_rarity("Ring of Resistance", &p), "Ring of Resistance");
        assert_eq!(strip_rarity("Gloves U, ", &p), "Gloves");
    }

    #[test]
    fn grade_becomes_parenthetical() {
        let p = patterns();
        assert_eq!(
            grade_to_parenthetical("Bottled Lightning, greater", &p),
            "Bottled Lightning (greater)"
        );
        assert_eq!(grade_to_parenthetical("Antidote, Lesser ", &p), "Antidote (Lesser)");
        assert_eq!(grade_to_parenthetical("Antidote, lesser, ", &p), "Antidote (lesser)");
        assert_eq!(grade_to_parenthetical("True Strike", &p), "True Strike");
    }

    #[test]
    fn item_type_moves_to_end() {
        let p = patterns();
        assert_eq!(
            item_type_to_parenthetical("Bag of Holding, Type II", &p),
            "Bag of Holding (Type II)"
        );
        assert_eq!(
            item_type_to_parenthetical("Bag of Holding, Type III", &p),
            "Bag of Holding (Type III)"
        );
        assert_eq!(
            item_type_to_parenthetical("Aeon Stone, ruby (greater)", &p),
            "Aeon Stone (greater) (ruby)"
        );
        assert_eq!(item_type_to_parenthetical("Silversheen", &p), "Silversheen");
    }

    #[test]
    fn coarse_grade_moves_to_end() {
        let p = patterns();
        assert_eq!(
            coarse_grade_to_parenthetical("Cold Iron Ingot, low-grade", &p),
            "Cold Iron Ingot (low-grade)"
        );
        assert_eq!(
            coarse_grade_to_parenthetical("Armor Plating, High-Grade, ", &p),
            "Armor Plating, (High-Grade)"
        );
    }

    #[test]
    fn trailing_comma_dropped() {
        let p = patterns();
        assert_eq!(drop_trailing_comma("Caltrops, ", &p), "Caltrops");
        assert_eq!(drop_trailing_comma("Caltrops,", &p), "Caltrops");
        assert_eq!(drop_trailing_comma("Caltrops, Spiked", &p), "Caltrops, Spiked");
    }

    #[test]
    fn bonus_prefix_moves_to_end() {
        let p = patterns();
        assert_eq!(bonus_to_parenthetical("+2 Striking Rune", &p), "Striking Rune (+2)");
        assert_eq!(bonus_to_parenthetical("+1", &p), "+1");
        assert_eq!(bonus_to_parenthetical("Bracers +1", &p), "Bracers +1");
    }

    #[test]
    fn stacked_bonus_prefixes_all_move() {
        let p = patterns();
        assert_eq!(bonus_to_parenthetical("+1 +2 Foo", &p), "Foo (+1) (+2)");
        assert_eq!(bonus_to_parenthetical("  +1  +2 Foo ", &p), "Foo (+1) (+2)");
        assert_eq!(bonus_to_parenthetical("+1 +2", &p), "+1 +2");
        assert_eq!(bonus_to_parenthetical("Foo (+1) (+2)", &p), "Foo (+1) (+2)");
    }

    #[test]
    fn commas_removed() {
        assert_eq!(
            remove_commas("Mutagen, Bestial, Lesser", &patterns()),
            "Mutagen Bestial Lesser"
        );
    }
}
