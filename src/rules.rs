use crate::error::RuleCompileError;
use regex::{Regex, RegexBuilder};

/// Разделитель сегментов в строке правил
pub const RULE_SEPARATOR: char = ';';

/// Скомпилированное правило: регистронезависимое регулярное выражение по заголовку окна
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pattern: String,
    regex: Regex,
}

impl CompiledRule {
    pub fn compile(segment: &str) -> Result<Self, RuleCompileError> {
        let regex = RegexBuilder::new(segment)
            .case_insensitive(true)
            .build()
            .map_err(|source| RuleCompileError {
                segment: segment.to_string(),
                source,
            })?;

        Ok(Self {
            pattern: segment.to_string(),
            regex,
        })
    }

    /// Исходный текст сегмента
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Поиск в любом месте заголовка, без привязки к началу и концу строки
    pub fn is_match(&self, window_title: &str) -> bool {
        self.regex.is_match(window_title)
    }
}

/// Результат разбора строки правил
#[derive(Debug, Default)]
pub struct ParsedRules {
    pub rules: Vec<CompiledRule>,
    pub rejected: Vec<RuleCompileError>,
}

/// Сегменты строки правил в исходном порядке.
///
/// Пустые сегменты пропускаются, пробелы не обрезаются.
pub fn split_segments(raw_rules: &str) -> impl Iterator<Item = &str> {
    raw_rules
        .split(RULE_SEPARATOR)
        .filter(|segment| !segment.is_empty())
}

/// Разбирает строку правил с нуля.
///
/// Ошибочный сегмент попадает в `rejected` и не мешает остальным.
pub fn parse_rules(raw_rules: &str) -> ParsedRules {
    let mut parsed = ParsedRules::default();

    for segment in split_segments(raw_rules) {
        match CompiledRule::compile(segment) {
            Ok(rule) => parsed.rules.push(rule),
            Err(e) => parsed.rejected.push(e),
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(parsed: &ParsedRules) -> Vec<&str> {
        parsed.rules.iter().map(|r| r.pattern()).collect()
    }

    #[test]
    fn test_split_preserves_order_and_drops_empty() {
        let segments: Vec<&str> = split_segments(";a;;b c; ;a;").collect();
        assert_eq!(segments, vec!["a", "b c", " ", "a"]);

        assert_eq!(split_segments("").count(), 0);
        assert_eq!(split_segments(";;;").count(), 0);
    }

    #[test]
    fn test_parse_keeps_segment_order() {
        let parsed = parse_rules("kitty;firefox;^nvim");
        assert_eq!(patterns(&parsed), vec!["kitty", "firefox", "^nvim"]);
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn test_bad_segment_does_not_discard_others() {
        let parsed = parse_rules("foo;(unclosed;bar;baz");
        assert_eq!(patterns(&parsed), vec!["foo", "bar", "baz"]);
        assert_eq!(parsed.rejected.len(), 1);
        assert_eq!(parsed.rejected[0].segment, "(unclosed");
    }

    #[test]
    fn test_empty_middle_segment_is_silent() {
        let parsed = parse_rules("foo;;bar");
        assert_eq!(parsed.rules.len(), 2);
        assert!(parsed.rejected.is_empty());
    }

    #[test]
    fn test_whitespace_segment_is_compiled() {
        let parsed = parse_rules(" ");
        assert_eq!(parsed.rules.len(), 1);
        assert!(parsed.rules[0].is_match("two words"));
        assert!(!parsed.rules[0].is_match("oneword"));
    }

    #[test]
    fn test_compiled_rule_is_case_insensitive_substring() {
        let rule = CompiledRule::compile("foo").unwrap();
        assert!(rule.is_match("xxfooxx"));
        assert!(rule.is_match("FOO"));
        assert!(rule.is_match("xxFoOxx"));
        assert!(!rule.is_match("fo"));
    }

    #[test]
    fn test_compile_error_carries_segment() {
        let err = CompiledRule::compile("[a-").unwrap_err();
        assert_eq!(err.segment, "[a-");
        assert!(err.to_string().contains("[a-"));
    }
}
