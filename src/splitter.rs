//! Kernel splitting
//!
//! Divides a multi-kernel source document into a shared preamble and one
//! block per `__kernel void <name>` declaration. Each block runs from its
//! declaration line up to the next declaration or the end of the document.
//! Line terminators are kept, so blocks reassemble into the original text.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static KERNEL_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__kernel[ \t]+void[ \t]+(\w+)").unwrap());

/// Return the kernel name declared on `line`, if any
#[must_use]
pub fn kernel_name(line: &str) -> Option<&str> {
    KERNEL_DECLARATION
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// One kernel's own lines, declaration first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelBlock {
    /// Name captured from the declaration
    pub name: String,
    /// Block text, declaration line included
    pub body: String,
}

impl KernelBlock {
    fn open(name: &str, declaration: &str) -> Self {
        Self {
            name: name.to_string(),
            body: declaration.to_string(),
        }
    }

    /// Standalone source text: the preamble followed by this block
    #[must_use]
    pub fn artifact(&self, preamble: &str) -> String {
        let mut text = String::with_capacity(preamble.len() + self.body.len());
        text.push_str(preamble);
        text.push_str(&self.body);
        text
    }
}

/// A source document divided into preamble and kernel blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitDocument {
    /// Lines before the first declaration
    pub preamble: String,
    /// Kernel blocks in document order
    pub kernels: Vec<KernelBlock>,
}

impl SplitDocument {
    /// True when the document declares no kernels
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    /// Iterate over `(name, artifact text)` pairs
    pub fn artifacts(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.kernels
            .iter()
            .map(|k| (k.name.as_str(), k.artifact(&self.preamble)))
    }
}

/// Where the next non-declaration line goes
enum Target {
    NoTarget,
    OpenKernel(KernelBlock),
}

/// Split `source` into preamble and kernel blocks
#[must_use]
pub fn split_document(source: &str) -> SplitDocument {
    let mut doc = SplitDocument::default();
    let mut target = Target::NoTarget;

    for line in source.split_inclusive('\n') {
        if let Some(name) = kernel_name(line) {
            debug!(kernel = name, "found kernel declaration");
            if let Target::OpenKernel(block) = target {
                doc.kernels.push(block);
            }
            if doc.kernels.iter().any(|k| k.name == name) {
                warn!(
                    kernel = name,
                    "kernel name repeats; its artifact will be overwritten"
                );
            }
            target = Target::OpenKernel(KernelBlock::open(name, line));
            continue;
        }

        match &mut target {
            Target::OpenKernel(block) => block.body.push_str(line),
            Target::NoTarget => doc.preamble.push_str(line),
        }
    }

    if let Target::OpenKernel(block) = target {
        doc.kernels.push(block);
    }

    if doc.is_empty() {
        warn!("no kernel declarations found");
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TWO_KERNELS: &str = "\
#define N 64
typedef float real;

__kernel void vec_add(__global real *a, __global real *b) {
    int i = get_global_id(0);
    a[i] += b[i];
}

__kernel  void vec_scale(__global real *a, real k) {
    a[get_global_id(0)] *= k;
}";

    #[test]
    fn test_kernel_name_extraction() {
        assert_eq!(kernel_name("__kernel void foo_bar2(int x)"), Some("foo_bar2"));
        assert_eq!(kernel_name("  __kernel\tvoid  k(...)"), Some("k"));
        assert_eq!(kernel_name("__kernel float not_void()"), None);
        assert_eq!(kernel_name("void helper()"), None);
    }

    #[test]
    fn test_split_two_kernels() {
        let doc = split_document(TWO_KERNELS);

        assert_eq!(doc.preamble, "#define N 64\ntypedef float real;\n\n");
        assert_eq!(doc.kernels.len(), 2);
        assert_eq!(doc.kernels[0].name, "vec_add");
        assert!(doc.kernels[0].body.starts_with("__kernel void vec_add"));
        assert!(doc.kernels[0].body.ends_with("}\n\n"));
        assert_eq!(doc.kernels[1].name, "vec_scale");
        assert!(doc.kernels[1].body.ends_with('}'));
    }

    #[test]
    fn test_last_kernel_without_trailing_newline() {
        let doc = split_document("__kernel void only() {}");
        assert_eq!(doc.kernels.len(), 1);
        assert_eq!(doc.kernels[0].body, "__kernel void only() {}");
    }

    #[test]
    fn test_artifact_prefixed_with_preamble() {
        let doc = split_document(TWO_KERNELS);
        for (_, text) in doc.artifacts() {
            assert!(text.starts_with(&doc.preamble));
        }
    }

    #[test]
    fn test_no_kernels() {
        let doc = split_document("#include <x.h>\nint helper(void);\n");
        assert!(doc.is_empty());
        assert_eq!(doc.preamble, "#include <x.h>\nint helper(void);\n");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(split_document(""), SplitDocument::default());
    }

    #[test]
    fn test_crlf_preserved() {
        let source = "// hdr\r\n__kernel void k() {\r\n}\r\n";
        let doc = split_document(source);
        assert_eq!(doc.preamble, "// hdr\r\n");
        assert_eq!(doc.kernels[0].body, "__kernel void k() {\r\n}\r\n");
    }

    #[test]
    fn test_duplicate_names_both_kept() {
        let doc = split_document("__kernel void k() {}\n__kernel void k() {}\n");
        assert_eq!(doc.kernels.len(), 2);
    }

    fn document_strategy() -> impl Strategy<Value = (String, usize)> {
        let plain = "[a-z #;(){}=+*]{0,24}\n";
        let names = prop::collection::vec("[a-z_][a-z0-9_]{0,8}", 0..6);
        (
            prop::collection::vec(plain, 0..5),
            names,
            prop::collection::vec(prop::collection::vec(plain, 0..5), 6),
        )
            .prop_map(|(preamble, names, bodies)| {
                let mut text: String = preamble.concat();
                for (name, body) in names.iter().zip(bodies) {
                    text.push_str(&format!("__kernel void {name}(int x) {{\n"));
                    text.push_str(&body.concat());
                }
                (text, names.len())
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_one_block_per_declaration((text, count) in document_strategy()) {
            prop_assert_eq!(split_document(&text).kernels.len(), count);
        }

        #[test]
        fn prop_preamble_plus_blocks_reassemble((text, _) in document_strategy()) {
            let doc = split_document(&text);
            let mut rebuilt = doc.preamble.clone();
            for block in &doc.kernels {
                rebuilt.push_str(&block.body);
            }
            prop_assert_eq!(rebuilt, text);
        }

        #[test]
        fn prop_every_artifact_starts_with_preamble((text, _) in document_strategy()) {
            let doc = split_document(&text);
            for (name, artifact) in doc.artifacts() {
                prop_assert!(artifact.starts_with(&doc.preamble));
                let rest = &artifact[doc.preamble.len()..];
                let declaration = rest.lines().next().unwrap_or("");
                prop_assert_eq!(kernel_name(declaration), Some(name));
            }
        }
    }
}
