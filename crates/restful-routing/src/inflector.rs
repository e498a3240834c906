// File: src/inflector.rs
// Purpose: English noun inflection used to derive resource names

use once_cell::sync::Lazy;
use regex::Regex;

/// Converts nouns between singular and plural form
///
/// Injected into the mapper so applications can swap in their own rules
/// (another language, domain-specific irregulars). Implementations never fail:
/// an unknown word yields a best-effort guess.
pub trait Inflector: Send + Sync {
    fn pluralize(&self, word: &str) -> String;
    fn singularize(&self, word: &str) -> String;
}

/// A regex rule and its replacement
struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    fn new(pattern: &str, replacement: &str) -> Option<Self> {
        Regex::new(&format!("(?i){}", pattern))
            .ok()
            .map(|pattern| Rule {
                pattern,
                replacement: replacement.to_string(),
            })
    }

    fn apply(&self, word: &str) -> Option<String> {
        self.pattern
            .is_match(word)
            .then(|| self.pattern.replace(word, self.replacement.as_str()).into_owned())
    }
}

/// Ordered rule sets; later rules take precedence
struct RuleSet {
    plurals: Vec<Rule>,
    singulars: Vec<Rule>,
    uncountables: Vec<&'static str>,
}

const PLURALS: &[(&str, &str)] = &[
    ("$", "s"),
    ("s$", "s"),
    ("(ax|test)is$", "${1}es"),
    ("(octop|vir)us$", "${1}i"),
    ("(alias|status)$", "${1}es"),
    ("(bu)s$", "${1}ses"),
    ("(buffal|tomat)o$", "${1}oes"),
    ("([ti])um$", "${1}a"),
    ("sis$", "ses"),
    ("(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
    ("(hive)$", "${1}s"),
    ("([^aeiouy]|qu)y$", "${1}ies"),
    ("(x|ch|ss|sh)$", "${1}es"),
    ("(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
    ("([ml])ouse$", "${1}ice"),
    ("^(ox)$", "${1}en"),
    ("(quiz)$", "${1}zes"),
];

const SINGULARS: &[(&str, &str)] = &[
    ("s$", ""),
    ("(n)ews$", "${1}ews"),
    ("([ti])a$", "${1}um"),
    (
        "((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)ses$",
        "${1}sis",
    ),
    ("(^analy)ses$", "${1}sis"),
    ("([^f])ves$", "${1}fe"),
    ("(hive)s$", "${1}"),
    ("(tive)s$", "${1}"),
    ("([lr])ves$", "${1}f"),
    ("([^aeiouy]|qu)ies$", "${1}y"),
    ("(s)eries$", "${1}eries"),
    ("(m)ovies$", "${1}ovie"),
    ("(x|ch|ss|sh)es$", "${1}"),
    ("([ml])ice$", "${1}ouse"),
    ("(bus)es$", "${1}"),
    ("(o)es$", "${1}"),
    ("(shoe)s$", "${1}"),
    ("(cris|ax|test)es$", "${1}is"),
    ("(octop|vir)i$", "${1}us"),
    ("(alias|status)es$", "${1}"),
    ("^(ox)en", "${1}"),
    ("(vert|ind)ices$", "${1}ex"),
    ("(matr)ices$", "${1}ix"),
    ("(quiz)zes$", "${1}"),
];

const IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
];

const UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
];

static ENGLISH: Lazy<RuleSet> = Lazy::new(|| {
    let mut plurals: Vec<Rule> = PLURALS
        .iter()
        .filter_map(|(pattern, replacement)| Rule::new(pattern, replacement))
        .collect();
    let mut singulars: Vec<Rule> = SINGULARS
        .iter()
        .filter_map(|(pattern, replacement)| Rule::new(pattern, replacement))
        .collect();

    // Irregulars keep the caller's first letter: "Person" -> "People"
    for (singular, plural) in IRREGULARS {
        let (s_head, s_tail) = singular.split_at(1);
        let (_, p_tail) = plural.split_at(1);
        plurals.extend(Rule::new(
            &format!("({}){}$", s_head, s_tail),
            &format!("${{1}}{}", p_tail),
        ));
        singulars.extend(Rule::new(
            &format!("({}){}$", s_head, p_tail),
            &format!("${{1}}{}", s_tail),
        ));
    }

    RuleSet {
        plurals,
        singulars,
        uncountables: UNCOUNTABLES.to_vec(),
    }
});

/// Rule-based English inflector
///
/// # Examples
///
/// ```
/// use restful_routing::{EnglishInflector, Inflector};
///
/// let inflector = EnglishInflector::new();
/// assert_eq!(inflector.pluralize("Blog"), "Blogs");
/// assert_eq!(inflector.pluralize("category"), "categories");
/// assert_eq!(inflector.singularize("people"), "person");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

impl EnglishInflector {
    pub fn new() -> Self {
        Self
    }

    fn inflect(word: &str, rules: &[Rule]) -> String {
        let lower = word.to_lowercase();
        if ENGLISH.uncountables.iter().any(|u| *u == lower) {
            return word.to_string();
        }

        rules
            .iter()
            .rev()
            .find_map(|rule| rule.apply(word))
            .unwrap_or_else(|| word.to_string())
    }
}

impl Inflector for EnglishInflector {
    fn pluralize(&self, word: &str) -> String {
        Self::inflect(word, &ENGLISH.plurals)
    }

    fn singularize(&self, word: &str) -> String {
        Self::inflect(word, &ENGLISH.singulars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("blog", "blogs")]
    #[case("Blog", "Blogs")]
    #[case("comment", "comments")]
    #[case("category", "categories")]
    #[case("box", "boxes")]
    #[case("status", "statuses")]
    #[case("mouse", "mice")]
    #[case("knife", "knives")]
    #[case("person", "people")]
    #[case("Person", "People")]
    #[case("child", "children")]
    #[case("sheep", "sheep")]
    #[case("ox", "oxen")]
    #[case("quiz", "quizzes")]
    #[case("matrix", "matrices")]
    fn test_pluralize(#[case] singular: &str, #[case] plural: &str) {
        assert_eq!(EnglishInflector.pluralize(singular), plural);
    }

    #[rstest]
    #[case("blogs", "blog")]
    #[case("comments", "comment")]
    #[case("categories", "category")]
    #[case("boxes", "box")]
    #[case("statuses", "status")]
    #[case("mice", "mouse")]
    #[case("people", "person")]
    #[case("children", "child")]
    #[case("series", "series")]
    #[case("news", "news")]
    #[case("analyses", "analysis")]
    fn test_singularize(#[case] plural: &str, #[case] singular: &str) {
        assert_eq!(EnglishInflector.singularize(plural), singular);
    }

    #[test]
    fn test_unknown_words_get_a_guess() {
        assert_eq!(EnglishInflector.pluralize("zzz"), "zzzs");
        assert_eq!(EnglishInflector.singularize("zzz"), "zzz");
    }
}
