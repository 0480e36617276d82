//! Display-title extraction from free-form post text.
//!
//! A best-effort heuristic: the pipeline cuts the text down to something that
//! usually reads like a title. It is lossy and will be wrong for some posts.

use std::sync::LazyLock;

use regex::Regex;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("valid URL regex"));

static NAME_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("名称[:：]").expect("valid label regex"));

/// One transformation in the title pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleStep {
    /// Remove every URL-shaped substring.
    StripUrls,
    /// Keep the text after the last `名称:` label that is followed by
    /// something other than whitespace.
    AfterNameLabel,
    /// Keep the text before the first opening parenthesis, unless that is blank.
    BeforeParenthesis,
    /// Keep the first line, unless it is blank.
    FirstLine,
    /// Keep the first two whitespace-separated tokens.
    FirstTwoWords,
    /// Keep the text before the first comma.
    BeforeComma,
    /// Trim surrounding whitespace.
    Trim,
}

impl TitleStep {
    /// Apply this step to the output of the previous one.
    pub fn apply(self, text: &str) -> String {
        match self {
            TitleStep::StripUrls => URL.replace_all(text, "").into_owned(),
            TitleStep::AfterNameLabel => NAME_LABEL
                .split(text)
                .skip(1)
                .filter(|rest| !is_blank(rest))
                .last()
                .unwrap_or(text)
                .to_string(),
            TitleStep::BeforeParenthesis => text
                .find(['(', '（'])
                .map(|idx| &text[..idx])
                .filter(|head| !is_blank(head))
                .unwrap_or(text)
                .to_string(),
            TitleStep::FirstLine => text
                .lines()
                .next()
                .filter(|line| !is_blank(line))
                .unwrap_or(text)
                .to_string(),
            TitleStep::FirstTwoWords => text.split_whitespace().take(2).collect::<Vec<_>>().join(" "),
            TitleStep::BeforeComma => text
                .split([',', '，'])
                .next()
                .unwrap_or_default()
                .to_string(),
            TitleStep::Trim => text.trim().to_string(),
        }
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Ordered title extraction pipeline.
#[derive(Debug, Clone)]
pub struct TitleNormalizer {
    steps: Vec<TitleStep>,
}

impl TitleNormalizer {
    /// Create a normalizer running custom steps in order.
    pub fn with_steps(steps: Vec<TitleStep>) -> Self {
        Self { steps }
    }

    /// Reduce raw post text to a short display title.
    pub fn normalize(&self, text: &str) -> String {
        self.steps
            .iter()
            .fold(text.to_string(), |acc, step| step.apply(&acc))
    }
}

impl Default for TitleNormalizer {
    fn default() -> Self {
        Self::with_steps(vec![
            TitleStep::StripUrls,
            TitleStep::AfterNameLabel,
            TitleStep::BeforeParenthesis,
            TitleStep::FirstLine,
            TitleStep::FirstTwoWords,
            TitleStep::BeforeComma,
            TitleStep::Trim,
        ])
    }
}

/// Normalize with the default pipeline.
pub fn normalize_title(text: &str) -> String {
    static DEFAULT: LazyLock<TitleNormalizer> = LazyLock::new(TitleNormalizer::default);
    DEFAULT.normalize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_title() {
        assert_eq!(normalize_title("名称：Foo Movie (2020) extra"), "Foo Movie");
    }

    #[test]
    fn test_strip_urls() {
        assert_eq!(
            TitleStep::StripUrls.apply("看 https://pan.quark.cn/s/abc 和 HTTP://X.COM/y"),
            "看  和 "
        );
    }

    #[test]
    fn test_last_label_wins() {
        assert_eq!(TitleStep::AfterNameLabel.apply("名称:A 名称：B"), "B");
        assert_eq!(TitleStep::AfterNameLabel.apply("no label"), "no label");
        assert_eq!(TitleStep::AfterNameLabel.apply("名称:A,B 名称:"), "A,B ");
        assert_eq!(TitleStep::AfterNameLabel.apply("tail 名称: "), "tail 名称: ");
    }

    #[test]
    fn test_before_parenthesis() {
        assert_eq!(TitleStep::BeforeParenthesis.apply("流浪地球（2019）"), "流浪地球");
        assert_eq!(TitleStep::BeforeParenthesis.apply("Foo (1) (2)"), "Foo ");
        assert_eq!(TitleStep::BeforeParenthesis.apply("(2020) Foo"), "(2020) Foo");
        assert_eq!(TitleStep::BeforeParenthesis.apply(" （合集）Foo"), " （合集）Foo");
    }

    #[test]
    fn test_first_line() {
        assert_eq!(TitleStep::FirstLine.apply("one\ntwo"), "one");
        assert_eq!(TitleStep::FirstLine.apply("\nsecond"), "\nsecond");
        assert_eq!(TitleStep::FirstLine.apply("  \nsecond"), "  \nsecond");
        assert_eq!(TitleStep::FirstLine.apply("crlf\r\nnext"), "crlf");
    }

    #[test]
    fn test_first_two_words() {
        assert_eq!(TitleStep::FirstTwoWords.apply("  a   b c "), "a b");
        assert_eq!(TitleStep::FirstTwoWords.apply("single"), "single");
    }

    #[test]
    fn test_before_comma() {
        assert_eq!(TitleStep::BeforeComma.apply("甲，乙"), "甲");
        assert_eq!(TitleStep::BeforeComma.apply("a,b"), "a");
        assert_eq!(TitleStep::BeforeComma.apply(",a"), "");
    }

    #[test]
    fn test_full_post() {
        let text = "🎬 名称：流浪地球2 4K\n简介：太阳即将毁灭，人类在地球表面建造出巨大的推进器\n链接：https://pan.quark.cn/s/1a2b3c";
        assert_eq!(normalize_title(text), "流浪地球2 4K");
    }

    #[test]
    fn test_blank_cuts_keep_the_text() {
        assert_eq!(normalize_title("\n流浪地球 4K\n链接"), "流浪地球 4K");
        assert_eq!(normalize_title("（合集）流浪地球 4K"), "（合集）流浪地球 4K");
        assert_eq!(normalize_title("流浪地球 名称："), "流浪地球 名称：");
        assert_eq!(normalize_title("名称：星际穿越\n名称："), "星际穿越");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize_title(""), "");
        assert_eq!(normalize_title("https://pan.quark.cn/s/abc"), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "名称：Foo Movie (2020) extra",
            "(2020) Foo Bar Baz",
            "\n\nleading newlines here",
            "名称:A,B 名称:",
            "x名称：",
            "甲乙丙，丁 戊",
            "https://t.me/x/1 Hello World Again",
            "  名称： 星际穿越（Interstellar） 2014\nhttps://drive.uc.cn/s/abc",
            "httphttps://a.b tp://c",
            "\n流浪地球 4K\n链接",
            "（合集）流浪地球 4K",
            "流浪地球 名称：",
            "名称： \n名称：(2020) Foo, Bar",
            " (a) b,c (d",
        ];
        for sample in samples {
            let once = normalize_title(sample);
            assert_eq!(normalize_title(&once), once, "{sample:?}");
        }
    }

    #[test]
    fn test_custom_steps() {
        let normalizer = TitleNormalizer::with_steps(vec![TitleStep::FirstLine, TitleStep::Trim]);
        assert_eq!(normalizer.normalize(" a b c \nd"), "a b c");
    }
}
