use serde::de::DeserializeOwned;

/// JSON 預處理器，支援 C-style 註解
///
/// Template files are hand-edited, so `//` and `/* */` comments are allowed
/// and stripped before handing the text to serde. Newlines inside comments
/// are kept so serde's line numbers still point at the original file.
pub struct JsonPreprocessor;

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mode {
    Code,
    Str,
    StrEscape,
    LineComment,
    BlockComment,
}

impl JsonPreprocessor {
    pub fn remove_comments(json_str: &str) -> String {
        let mut out = String::with_capacity(json_str.len());
        let mut mode = Mode::Code;
        let mut chars = json_str.chars().peekable();

        while let Some(c) = chars.next() {
            mode = match mode {
                Mode::Code => match (c, chars.peek()) {
                    ('/', Some('/')) => {
                        chars.next();
                        Mode::LineComment
                    }
                    ('/', Some('*')) => {
                        chars.next();
                        Mode::BlockComment
                    }
                    ('"', _) => {
                        out.push(c);
                        Mode::Str
                    }
                    _ => {
                        out.push(c);
                        Mode::Code
                    }
                },
                Mode::Str => {
                    out.push(c);
                    match c {
                        '\\' => Mode::StrEscape,
                        '"' => Mode::Code,
                        _ => Mode::Str,
                    }
                }
                Mode::StrEscape => {
                    out.push(c);
                    Mode::Str
                }
                Mode::LineComment => {
                    if c == '\n' {
                        out.push(c);
                        Mode::Code
                    } else {
                        Mode::LineComment
                    }
                }
                Mode::BlockComment => {
                    if c == '\n' {
                        out.push(c);
                    }
                    if c == '*' && chars.peek() == Some(&'/') {
                        chars.next();
                        Mode::Code
                    } else {
                        Mode::BlockComment
                    }
                }
            };
        }

        out
    }

    /// 從字串解析支援註解的 JSON
    pub fn parse_json_with_comments<T>(json_str: &str) -> Result<T, serde_json::Error>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(&Self::remove_comments(json_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_single_line_comments() {
        let json_with_comments = r#"
        {
            // 這是一個註解
            "name": "test", // 行尾註解
            "value": 123
        }
        "#;

        let value: Value = JsonPreprocessor::parse_json_with_comments(json_with_comments).unwrap();
        assert_eq!(value["name"], "test");
        assert_eq!(value["value"], 123);
    }

    #[test]
    fn test_multiline_comments() {
        let json_with_comments = r#"
        {
            /* 這是一個
               多行註解 */
            "name": "test",
            "value": /* 行內註解 */ 123
        }
        "#;

        let value: Value = JsonPreprocessor::parse_json_with_comments(json_with_comments).unwrap();
        assert_eq!(value["name"], "test");
        assert_eq!(value["value"], 123);
    }

    #[test]
    fn test_comment_markers_inside_strings_are_kept() {
        let json = r#"{ "url": "http://host/*x*/", "quote": "a \"//\" b" }"#;
        let value: Value = JsonPreprocessor::parse_json_with_comments(json).unwrap();
        assert_eq!(value["url"], "http://host/*x*/");
        assert_eq!(value["quote"], "a \"//\" b");
    }

    #[test]
    fn test_line_numbers_survive() {
        let json = "{\n/* one\ntwo */\n\"a\": }";
        let err = JsonPreprocessor::parse_json_with_comments::<Value>(json).unwrap_err();
        assert_eq!(err.line(), 4);
    }
}
