//! Output units handed to a [`DictionarySink`](crate::sink::DictionarySink).
//!
//! A definition is either one annotated string or a Yomitan
//! `structured-content` node list (annotated string first, then illustration
//! nodes). Both serialize to the term bank JSON shape directly.

use serde::{Deserialize, Serialize};

/// The two parallel reading systems every dataset is exported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadingSystem {
    /// Bopomofo (注音)
    Zhuyin,
    /// Hanyu Pinyin (拼音)
    Pinyin,
}

impl ReadingSystem {
    pub const ALL: [ReadingSystem; 2] = [ReadingSystem::Zhuyin, ReadingSystem::Pinyin];

    /// Suffix used in dictionary titles.
    pub fn title_suffix(self) -> &'static str {
        match self {
            ReadingSystem::Zhuyin => "注音",
            ReadingSystem::Pinyin => "拼音",
        }
    }

    /// Suffix used in output file names.
    pub fn slug(self) -> &'static str {
        match self {
            ReadingSystem::Zhuyin => "zhuyin",
            ReadingSystem::Pinyin => "pinyin",
        }
    }
}

/// One node of a structured definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentNode {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum Element {
    Details {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<Style>,
        content: Vec<ContentNode>,
    },
    Summary {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
    },
    Img {
        path: String,
        collapsed: bool,
        collapsible: bool,
        background: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub cursor: String,
}

impl ContentNode {
    /// Collapsible illustration: a `圖片: <caption>` summary over an image.
    pub fn illustration(caption: &str, path: &str) -> Self {
        ContentNode::Element(Element::Details {
            style: Some(Style {
                cursor: "pointer".to_string(),
            }),
            content: vec![
                ContentNode::Element(Element::Summary {
                    content: format!("圖片: {caption}"),
                    lang: Some("zh-TW".to_string()),
                }),
                ContentNode::Element(Element::Img {
                    path: path.to_string(),
                    collapsed: false,
                    collapsible: false,
                    background: false,
                }),
            ],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "structured-content")]
pub struct StructuredContent {
    pub content: Vec<ContentNode>,
}

/// Definition body of a term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Definition {
    Text(String),
    Structured(StructuredContent),
}

impl Definition {
    /// The leading annotated text of the definition.
    pub fn text(&self) -> &str {
        match self {
            Definition::Text(s) => s,
            Definition::Structured(sc) => match sc.content.first() {
                Some(ContentNode::Text(s)) => s,
                _ => "",
            },
        }
    }

    /// Number of illustration nodes after the leading text.
    pub fn illustration_count(&self) -> usize {
        match self {
            Definition::Text(_) => 0,
            Definition::Structured(sc) => sc
                .content
                .iter()
                .filter(|n| matches!(n, ContentNode::Element(Element::Details { .. })))
                .count(),
        }
    }
}

/// A single term entry for one script form and one reading system.
#[derive(Debug, Clone, PartialEq)]
pub struct TermVariant {
    pub term: String,
    pub reading: String,
    pub definition: Definition,
    pub score: i64,
}

/// Yomitan term bank row:
/// `[term, reading, definitionTags, rules, score, definitions, sequence, termTags]`.
pub type TermBankRow<'a> = (&'a str, &'a str, &'a str, &'a str, i64, [&'a Definition; 1], i64, &'a str);

impl TermVariant {
    pub fn new<T: Into<String>, R: Into<String>>(term: T, reading: R, definition: Definition) -> Self {
        Self {
            term: term.into(),
            reading: reading.into(),
            definition,
            score: 0,
        }
    }

    pub fn with_score(self, score: i64) -> Self {
        Self { score, ..self }
    }

    pub fn bank_row(&self) -> TermBankRow<'_> {
        (
            self.term.as_str(),
            self.reading.as_str(),
            "",
            "",
            self.score,
            [&self.definition],
            0,
            "",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_definition_serializes_as_string() {
        let v = serde_json::to_value(Definition::Text("【牌】".into())).unwrap();
        assert_eq!(v, json!("【牌】"));
    }

    #[test]
    fn test_structured_definition_shape() {
        let def = Definition::Structured(StructuredContent {
            content: vec![
                ContentNode::Text("【牌】".into()),
                ContentNode::illustration("招牌", "img/a.jpg"),
            ],
        });
        let v = serde_json::to_value(&def).unwrap();
        assert_eq!(
            v,
            json!({
                "type": "structured-content",
                "content": [
                    "【牌】",
                    {
                        "tag": "details",
                        "style": { "cursor": "pointer" },
                        "content": [
                            { "tag": "summary", "content": "圖片: 招牌", "lang": "zh-TW" },
                            {
                                "tag": "img",
                                "path": "img/a.jpg",
                                "collapsed": false,
                                "collapsible": false,
                                "background": false
                            }
                        ]
                    }
                ]
            })
        );
        let back: Definition = serde_json::from_value(v).unwrap();
        assert_eq!(back, def);
        assert_eq!(def.text(), "【牌】");
        assert_eq!(def.illustration_count(), 1);
    }

    #[test]
    fn test_bank_row_layout() {
        let t = TermVariant::new("牌", "ㄆㄞˊ", Definition::Text("x".into())).with_score(99);
        let v = serde_json::to_value(t.bank_row()).unwrap();
        assert_eq!(v, json!(["牌", "ㄆㄞˊ", "", "", 99, ["x"], 0, ""]));
    }
}
