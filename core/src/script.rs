//! Traditional → simplified headword conversion.
//!
//! The resolver never fails: if the converter cannot handle a term it hands
//! the term back unchanged, so the pipeline stays total.
//!
//! Its output is stable under a second pass. Plain `tw2s` is not: 什麼 gives
//! 什么, and 什么 read as Taiwan text gives 什幺. Text that is already the
//! simplified image of its own traditional form is therefore left alone, and
//! conversion repeats until the form settles.

use once_cell::sync::Lazy;
use opencc_jieba_rs::OpenCC;
use std::panic::{self, AssertUnwindSafe};

/// Something that turns Taiwan-traditional text into simplified text.
pub trait ScriptConverter {
    fn to_simplified(&self, text: &str) -> String;

    /// Simplified → traditional, when the converter supports that direction.
    fn to_traditional(&self, _text: &str) -> Option<String> {
        None
    }
}

// Loading the OpenCC dictionaries is slow; share one instance per process.
static OPENCC: Lazy<OpenCC> = Lazy::new(OpenCC::new);

/// OpenCC `tw2s` conversion, with `s2tw` as the inverse.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenCcConverter;

impl ScriptConverter for OpenCcConverter {
    fn to_simplified(&self, text: &str) -> String {
        OPENCC.tw2s(text, false)
    }

    fn to_traditional(&self, text: &str) -> Option<String> {
        Some(OPENCC.s2tw(text, false))
    }
}

/// Conversion passes before giving up on a settled form.
const MAX_PASSES: usize = 4;

/// Deterministic, never-failing `term → simplified term` function.
pub struct VariantResolver {
    converter: Box<dyn ScriptConverter>,
}

impl VariantResolver {
    pub fn new<C: ScriptConverter + 'static>(converter: C) -> Self {
        Self {
            converter: Box::new(converter),
        }
    }

    /// Resolver backed by OpenCC.
    pub fn opencc() -> Self {
        Self::new(OpenCcConverter)
    }

    pub fn resolve(&self, term: &str) -> String {
        if term.is_empty() {
            return String::new();
        }
        let mut current = term.to_string();
        for _ in 0..MAX_PASSES {
            let next = match self.step(&current) {
                Some(next) => next,
                None => return current,
            };
            if next == current {
                return current;
            }
            current = next;
        }
        tracing::warn!(term, result = %current, "script conversion did not settle");
        current
    }

    /// One pass. `None` when the converter failed on `text`.
    fn step(&self, text: &str) -> Option<String> {
        if self.is_simplified_image(text) {
            return Some(text.to_string());
        }
        match self.guarded(|c| c.to_simplified(text)) {
            Some(simplified) if !simplified.is_empty() => Some(simplified),
            Some(_) => {
                tracing::warn!(term = text, "script conversion produced nothing, keeping term");
                None
            }
            None => {
                tracing::warn!(term = text, "script conversion failed, keeping term");
                None
            }
        }
    }

    /// True when simplifying the traditional form of `text` gives `text` back.
    fn is_simplified_image(&self, text: &str) -> bool {
        let Some(Some(traditional)) = self.guarded(|c| c.to_traditional(text)) else {
            return false;
        };
        self.guarded(|c| c.to_simplified(&traditional)).as_deref() == Some(text)
    }

    fn guarded<T>(&self, f: impl FnOnce(&dyn ScriptConverter) -> T) -> Option<T> {
        panic::catch_unwind(AssertUnwindSafe(|| f(self.converter.as_ref()))).ok()
    }
}

impl std::fmt::Debug for VariantResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Table(HashMap<char, char>);

    impl ScriptConverter for Table {
        fn to_simplified(&self, text: &str) -> String {
            text.chars().map(|c| *self.0.get(&c).unwrap_or(&c)).collect()
        }
    }

    struct Panicking;

    impl ScriptConverter for Panicking {
        fn to_simplified(&self, _text: &str) -> String {
            panic!("unsupported input")
        }
    }

    struct Empty;

    impl ScriptConverter for Empty {
        fn to_simplified(&self, _text: &str) -> String {
            String::new()
        }
    }

    fn table() -> VariantResolver {
        VariantResolver::new(Table([('兩', '两'), ('鳥', '鸟')].into_iter().collect()))
    }

    #[test]
    fn test_resolve_converts() {
        assert_eq!(table().resolve("一石兩鳥"), "一石两鸟");
        assert_eq!(table().resolve("牌"), "牌");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let r = table();
        for t in ["一石兩鳥", "牌", "", "abc"] {
            let once = r.resolve(t);
            assert_eq!(r.resolve(&once), once);
        }
    }

    /// Maps 麼→么 and, like OpenCC reading Taiwan text, 么→幺.
    struct Lossy;

    impl ScriptConverter for Lossy {
        fn to_simplified(&self, text: &str) -> String {
            text.chars()
                .map(|c| match c {
                    '麼' => '么',
                    '么' => '幺',
                    other => other,
                })
                .collect()
        }

        fn to_traditional(&self, text: &str) -> Option<String> {
            Some(text.replace('么', "麼"))
        }
    }

    #[test]
    fn test_simplified_output_is_kept_on_second_pass() {
        let r = VariantResolver::new(Lossy);
        assert_eq!(Lossy.to_simplified("什么"), "什幺");
        assert_eq!(r.resolve("什麼"), "什么");
        assert_eq!(r.resolve("什么"), "什么");
        assert_eq!(r.resolve("幺"), "幺");
    }

    #[test]
    fn test_opencc_resolve_is_idempotent() {
        let r = VariantResolver::opencc();
        assert_eq!(r.resolve("什麼"), "什么");
        for t in ["什麼", "一石兩鳥", "劃", "牌", "乾淨", "臺灣", "後來", "髮型"] {
            let once = r.resolve(t);
            assert_eq!(r.resolve(&once), once, "{t}");
        }
    }

    #[test]
    fn test_failures_degrade_to_identity() {
        assert_eq!(VariantResolver::new(Panicking).resolve("鳥"), "鳥");
        assert_eq!(VariantResolver::new(Empty).resolve("鳥"), "鳥");
        assert_eq!(VariantResolver::new(Panicking).resolve(""), "");
    }
}
