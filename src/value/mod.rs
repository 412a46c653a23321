//! The Logo datum: a word or a list of data.
//!
//! Every value the interpreter moves around is a [`Value`]: an
//! immutable word (any run of characters) or a list nesting further
//! values. Numbers and booleans are words with a reading; coercions
//! fail with a type error rather than guessing. Rendering has two
//! modes, the raw one used by `print` (lists flattened, no outer
//! brackets) and the `show` one (outer brackets kept).

mod name;

use smol_str::SmolStr;

pub use name::Name;

use crate::error::{Error, Result};

/// How close to an integer a float has to land to print as one.
const INTEGER_SNAP: f64 = 1e-5;

/// Significant digits used for non-integral numeric rendering.
const SIGNIFICANT_DIGITS: i32 = 6;

/// A recursive word-or-list datum.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Value {
    Word(SmolStr),
    List(Vec<Value>),
}

impl Value {
    /// The empty word.
    pub fn empty() -> Self {
        Value::Word(SmolStr::default())
    }

    pub fn word(text: impl AsRef<str>) -> Self {
        Value::Word(SmolStr::new(text.as_ref()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(items)
    }

    /// Render a float by the interpreter's numeric rule: values within
    /// 1e-5 of an integer print without a decimal point, everything
    /// else with six significant digits, trailing zeros trimmed.
    pub fn number(v: f64) -> Self {
        Value::word(format_number(v))
    }

    /// Booleans are the words `TRUE` and `FALSE`.
    pub fn boolean(b: bool) -> Self {
        Value::word(if b { "TRUE" } else { "FALSE" })
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Value::Word(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// The empty word and the empty list are both empty (and distinct).
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Word(w) => w.is_empty(),
            Value::List(items) => items.is_empty(),
        }
    }

    /// The word content, or a type error for a list.
    pub fn as_word(&self) -> Result<&str> {
        match self {
            Value::Word(w) => Ok(w),
            Value::List(_) => Err(Error::type_error("a word", self)),
        }
    }

    /// The list items, or a type error for a word.
    pub fn as_list(&self) -> Result<&[Value]> {
        match self {
            Value::List(items) => Ok(items),
            Value::Word(_) => Err(Error::type_error("a list", self)),
        }
    }

    pub fn as_double(&self) -> Result<f64> {
        self.as_word()
            .ok()
            .and_then(|w| w.parse::<f64>().ok())
            .ok_or_else(|| Error::type_error("a number", self))
    }

    pub fn as_integer(&self) -> Result<i64> {
        let word = self
            .as_word()
            .map_err(|_| Error::type_error("an integer", self))?;
        if let Ok(n) = word.parse::<i64>() {
            return Ok(n);
        }
        word.parse::<f64>()
            .map(|v| v.trunc() as i64)
            .map_err(|_| Error::type_error("an integer", self))
    }

    pub fn as_unsigned(&self) -> Result<usize> {
        let n = self.as_integer()?;
        usize::try_from(n).map_err(|_| Error::type_error("an unsigned integer", self))
    }

    /// Boolean reading: `TRUE`/`FALSE` (any case), `0` and the empty
    /// word are definite; every other non-empty word reads as true.
    pub fn as_bool(&self) -> Result<bool> {
        let word = self
            .as_word()
            .map_err(|_| Error::type_error("a boolean", self))?;
        if word.eq_ignore_ascii_case("false") || word == "0" || word.is_empty() {
            Ok(false)
        } else {
            Ok(true)
        }
    }

    /// Concatenation: two words join into one word, anything involving
    /// a list pushes onto the list.
    pub fn combine(self, other: Value) -> Value {
        match (self, other) {
            (Value::Word(a), Value::Word(b)) => {
                let mut joined = a.to_string();
                joined.push_str(&b);
                Value::word(joined)
            }
            (Value::List(mut a), Value::List(b)) => {
                a.extend(b);
                Value::List(a)
            }
            (Value::List(mut a), word) => {
                a.push(word);
                Value::List(a)
            }
            (word, Value::List(mut b)) => {
                b.push(word);
                Value::List(b)
            }
        }
    }

    /// First element of a list, first character of a word.
    pub fn front(&self) -> Result<Value> {
        match self {
            Value::Word(w) => w
                .chars()
                .next()
                .map(|c| Value::word(c.to_string()))
                .ok_or_else(|| Error::type_error("a non-empty word", self)),
            Value::List(items) => items
                .first()
                .cloned()
                .ok_or_else(|| Error::type_error("a non-empty list", self)),
        }
    }

    pub fn back(&self) -> Result<Value> {
        match self {
            Value::Word(w) => w
                .chars()
                .next_back()
                .map(|c| Value::word(c.to_string()))
                .ok_or_else(|| Error::type_error("a non-empty word", self)),
            Value::List(items) => items
                .last()
                .cloned()
                .ok_or_else(|| Error::type_error("a non-empty list", self)),
        }
    }

    /// Everything but the first element (or character).
    pub fn but_first(&self) -> Result<Value> {
        match self {
            Value::Word(w) => {
                let mut chars = w.chars();
                chars
                    .next()
                    .map(|_| Value::word(chars.as_str()))
                    .ok_or_else(|| Error::type_error("a non-empty word", self))
            }
            Value::List(items) => items
                .split_first()
                .map(|(_, rest)| Value::List(rest.to_vec()))
                .ok_or_else(|| Error::type_error("a non-empty list", self)),
        }
    }

    /// Everything but the last element (or character).
    pub fn but_last(&self) -> Result<Value> {
        match self {
            Value::Word(w) => {
                let mut chars = w.chars();
                chars
                    .next_back()
                    .map(|_| Value::word(chars.as_str()))
                    .ok_or_else(|| Error::type_error("a non-empty word", self))
            }
            Value::List(items) => items
                .split_last()
                .map(|(_, rest)| Value::List(rest.to_vec()))
                .ok_or_else(|| Error::type_error("a non-empty list", self)),
        }
    }

    /// Positional access, zero-based.
    pub fn at(&self, index: usize) -> Result<Value> {
        match self {
            Value::Word(w) => w
                .chars()
                .nth(index)
                .map(|c| Value::word(c.to_string()))
                .ok_or_else(|| Error::type_error("an index inside the word", self)),
            Value::List(items) => items
                .get(index)
                .cloned()
                .ok_or_else(|| Error::type_error("an index inside the list", self)),
        }
    }

    /// Replace the element at `index`. Words are immutable once
    /// constructed, so only lists accept this.
    pub fn set(&mut self, index: usize, value: Value) -> Result<()> {
        match self {
            Value::List(items) if index < items.len() => {
                items[index] = value;
                Ok(())
            }
            Value::List(_) => Err(Error::type_error("an index inside the list", self)),
            Value::Word(_) => Err(Error::type_error("a list", self)),
        }
    }

    /// Containment: for a list, element equality with `item`; for a
    /// word, substring search of `item` within this word.
    pub fn contains(&self, item: &Value) -> bool {
        match self {
            Value::List(items) => items.contains(item),
            Value::Word(w) => match item {
                Value::Word(needle) => w.contains(needle.as_str()),
                Value::List(_) => false,
            },
        }
    }

    /// `show` rendering: like [`Display`](std::fmt::Display) but lists
    /// keep their surrounding brackets.
    pub fn show(&self) -> String {
        match self {
            Value::Word(w) => w.to_string(),
            Value::List(_) => self.render(true),
        }
    }

    fn render(&self, brackets: bool) -> String {
        match self {
            Value::Word(w) => w.to_string(),
            Value::List(items) => {
                let body = items
                    .iter()
                    .map(|item| item.render(true))
                    .collect::<Vec<_>>()
                    .join(" ");
                if brackets {
                    format!("[{body}]")
                } else {
                    body
                }
            }
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty()
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::word(text)
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::word(text)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::boolean(b)
    }
}

impl std::fmt::Display for Value {
    /// Raw rendering: list elements joined by spaces without the outer
    /// brackets; nested lists keep theirs.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Numeric rendering shared by the arithmetic built-ins.
pub fn format_number(v: f64) -> String {
    let rounded = v.round();
    if (v - rounded).abs() < INTEGER_SNAP {
        return format!("{}", rounded as i64);
    }

    // Six significant digits, like iostream's default float mode.
    let magnitude = v.abs().log10().floor() as i32;
    let integer_digits = magnitude + 1;
    let decimals = (SIGNIFICANT_DIGITS - integer_digits).clamp(0, 17) as usize;
    let mut text = format!("{v:.decimals$}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_creation_and_default() {
        let word = Value::default();
        assert!(word.is_word());
        assert!(word.is_empty());
        assert_eq!(word, Value::word(""));

        let list = Value::list(vec![Value::word("hello"), Value::word("world")]);
        assert!(list.is_list());
        assert!(!list.is_empty());
        assert_ne!(Value::list(vec![]), Value::empty());
    }

    #[test]
    fn test_structural_equality() {
        let a = Value::list(vec![Value::word("test"), Value::word("test")]);
        let b = Value::list(vec![Value::word("test"), Value::word("test")]);
        assert_eq!(a, b);
        assert_ne!(a, Value::list(vec![Value::word("test")]));
        assert_ne!(Value::word("test"), Value::list(vec![Value::word("test")]));
    }

    #[test]
    fn test_rendering_modes() {
        let list = Value::list(vec![
            Value::word("word"),
            Value::word("test"),
            Value::word("hi"),
            Value::word("logo"),
        ]);
        assert_eq!(list.to_string(), "word test hi logo");
        assert_eq!(list.show(), "[word test hi logo]");

        let nested = Value::list(vec![
            Value::word("a"),
            Value::list(vec![Value::word("b"), Value::word("c")]),
        ]);
        assert_eq!(nested.to_string(), "a [b c]");
        assert_eq!(nested.show(), "[a [b c]]");
    }

    #[rstest]
    #[case("TRUE", true)]
    #[case("true", true)]
    #[case("FALSE", false)]
    #[case("false", false)]
    #[case("0", false)]
    #[case("", false)]
    #[case("anything", true)]
    fn test_bool_convention(#[case] word: &str, #[case] expected: bool) {
        assert_eq!(Value::word(word).as_bool().unwrap(), expected);
    }

    #[test]
    fn test_boolean_words() {
        assert_eq!(Value::boolean(true), Value::word("TRUE"));
        assert_eq!(Value::boolean(false), Value::word("FALSE"));
        assert!(Value::boolean(true).as_bool().unwrap());
    }

    #[test]
    fn test_coercions() {
        assert_eq!(Value::word("123").as_integer().unwrap(), 123);
        assert_eq!(Value::word("3.5").as_integer().unwrap(), 3);
        assert_eq!(Value::word("12.5").as_double().unwrap(), 12.5);
        assert_eq!(Value::word("7").as_unsigned().unwrap(), 7);

        assert!(Value::word("1c").as_double().is_err());
        assert!(Value::word("hello").as_integer().is_err());
        assert!(Value::word("-1").as_unsigned().is_err());
        assert!(Value::list(vec![]).as_double().is_err());
        assert!(Value::list(vec![]).as_bool().is_err());
    }

    #[test]
    fn test_combine() {
        let ab = Value::word("ab").combine(Value::word("cd"));
        assert_eq!(ab, Value::word("abcd"));

        let list = Value::list(vec![Value::word("a")]).combine(Value::list(vec![Value::word("b")]));
        assert_eq!(
            list,
            Value::list(vec![Value::word("a"), Value::word("b")])
        );

        let pushed = Value::list(vec![Value::word("a")]).combine(Value::word("b"));
        assert_eq!(
            pushed,
            Value::list(vec![Value::word("a"), Value::word("b")])
        );

        let pushed = Value::word("b").combine(Value::list(vec![Value::word("a")]));
        assert_eq!(
            pushed,
            Value::list(vec![Value::word("a"), Value::word("b")])
        );
    }

    #[test]
    fn test_selectors_on_words() {
        let word = Value::word("hello");
        assert_eq!(word.front().unwrap(), Value::word("h"));
        assert_eq!(word.back().unwrap(), Value::word("o"));
        assert_eq!(word.but_first().unwrap(), Value::word("ello"));
        assert_eq!(word.but_last().unwrap(), Value::word("hell"));
        assert_eq!(word.at(1).unwrap(), Value::word("e"));
        assert!(Value::word("").front().is_err());
    }

    #[test]
    fn test_selectors_on_lists() {
        let list = Value::list(vec![
            Value::word("a"),
            Value::word("b"),
            Value::word("c"),
        ]);
        assert_eq!(list.front().unwrap(), Value::word("a"));
        assert_eq!(list.back().unwrap(), Value::word("c"));
        assert_eq!(
            list.but_first().unwrap(),
            Value::list(vec![Value::word("b"), Value::word("c")])
        );
        assert_eq!(
            list.but_last().unwrap(),
            Value::list(vec![Value::word("a"), Value::word("b")])
        );
        assert!(Value::list(vec![]).back().is_err());
    }

    #[test]
    fn test_first_butfirst_rebuild() {
        // fput(first L, butfirst L) == L, and the word analogue.
        let list = Value::list(vec![
            Value::word("x"),
            Value::word("y"),
            Value::word("z"),
        ]);
        let rebuilt = match list.but_first().unwrap() {
            Value::List(mut rest) => {
                rest.insert(0, list.front().unwrap());
                Value::List(rest)
            }
            _ => unreachable!(),
        };
        assert_eq!(rebuilt, list);

        let word = Value::word("logo");
        let rebuilt = word.front().unwrap().combine(word.but_first().unwrap());
        assert_eq!(rebuilt, word);

        let rebuilt = word.but_last().unwrap().combine(word.back().unwrap());
        assert_eq!(rebuilt, word);
    }

    #[test]
    fn test_set_replaces_list_elements() {
        let mut list = Value::list(vec![Value::word("a"), Value::word("b")]);
        list.set(1, Value::word("c")).unwrap();
        assert_eq!(
            list,
            Value::list(vec![Value::word("a"), Value::word("c")])
        );
        assert!(list.set(5, Value::word("x")).is_err());
        assert!(Value::word("ab").set(0, Value::word("c")).is_err());
    }

    #[test]
    fn test_contains() {
        let list = Value::list(vec![Value::word("ell"), Value::word("b")]);
        assert!(list.contains(&Value::word("ell")));
        assert!(!list.contains(&Value::word("hello")));

        let word = Value::word("hello");
        assert!(word.contains(&Value::word("ell")));
        assert!(!word.contains(&Value::word("xyz")));
        assert!(!word.contains(&Value::list(vec![])));
    }

    #[test]
    fn test_ordering_for_beforep() {
        assert!(Value::word("abc") < Value::word("abd"));
        assert!(Value::word("a") < Value::list(vec![]));
        assert!(
            Value::list(vec![Value::word("a")]) < Value::list(vec![Value::word("b")])
        );
    }

    #[rstest]
    #[case(3.000001, "3")]
    #[case(2.999999, "3")]
    #[case(-3.000001, "-3")]
    #[case(0.0, "0")]
    #[case(5.0, "5")]
    #[case(1.1 + 2.2, "3.3")]
    #[case(3.14159265, "3.14159")]
    #[case(0.001234567, "0.00123457")]
    fn test_format_number(#[case] v: f64, #[case] expected: &str) {
        assert_eq!(format_number(v), expected);
    }
}
