//! The palette façade.
//!
//! [`Palette`] owns the compiled directive grammar and the comment splitter,
//! and exposes the four operations a host needs: read the controls, write
//! values back, allocate hashes and strip directives.

use std::ops::Range;

use memchr::memrchr2;
use sigil_carton::{CompactString, FxHashMap, FxHashSet};

use crate::config_line::ConfigLine;
use crate::convert::{extract, render};
use crate::directive::{Directive, DirectiveGrammar};
use crate::hash::{allocate, EntropyMint, IdMint};
use crate::trivia::TriviaSplitter;
use crate::types::{
    Control, ControlGroup, FailureReason, InjectFailure, InjectOutput, SigilError, TagValue,
    VisualConfig,
};

/// Directive engine over JavaScript source text.
///
/// Stateless between calls; one instance may serve any number of sources.
#[derive(Debug, Clone)]
pub struct Palette {
    grammar: DirectiveGrammar,
    trivia: TriviaSplitter,
}

impl Palette {
    /// Compile the directive grammar.
    pub fn new() -> Result<Self, SigilError> {
        Ok(Self {
            grammar: DirectiveGrammar::new()?,
            trivia: TriviaSplitter::new()?,
        })
    }

    /// Every directive in `source`, in source order.
    #[inline]
    pub fn directives<'a>(&'a self, source: &'a str) -> impl Iterator<Item = Directive<'a>> + 'a {
        self.grammar.locate(source)
    }

    /// Decompose a config line, `None` when it holds no literal.
    #[inline]
    pub fn decompose<'a>(&self, line: &'a str, terminator: &'a str) -> Option<ConfigLine<'a>> {
        ConfigLine::decompose(&self.trivia, line, terminator)
    }

    /// Collect the controls `user` may see.
    ///
    /// Directives whose line cannot be decomposed or whose literal is illegal
    /// for the tag are skipped.
    pub fn parse(&self, source: &str, user: Option<&str>) -> VisualConfig {
        let mut groups: Vec<ControlGroup> = Vec::new();
        let mut by_name: FxHashMap<CompactString, usize> = FxHashMap::default();
        let mut ungrouped = Vec::new();

        for directive in self.directives(source) {
            let control = match self.resolve(&directive, user) {
                Ok(control) => control,
                Err(reason) => {
                    tracing::debug!(
                        "skipping @{} at {}: {}",
                        directive.tag,
                        directive.source_offset(),
                        reason
                    );
                    continue;
                }
            };

            match directive.attributes.group() {
                Some(name) => {
                    let index = *by_name.entry(CompactString::new(name)).or_insert_with(|| {
                        groups.push(ControlGroup {
                            name: CompactString::new(name),
                            controls: Vec::new(),
                        });
                        groups.len() - 1
                    });
                    groups[index].controls.push(control);
                }
                None => ungrouped.push(control),
            }
        }

        if !ungrouped.is_empty() {
            groups.push(ControlGroup {
                name: CompactString::default(),
                controls: ungrouped,
            });
        }
        VisualConfig { groups }
    }

    fn resolve(&self, directive: &Directive<'_>, user: Option<&str>) -> Result<Control, FailureReason> {
        let line = self.checked_line(directive, user)?;
        let (value, js_type) = extract(directive.tag, line.literal)?;
        Ok(Control {
            tag: directive.tag,
            hash: directive.hash().map(CompactString::new),
            attributes: directive.attributes.clone(),
            value,
            js_type,
        })
    }

    /// Access check and decomposition shared by `parse` and `inject`.
    fn checked_line<'a>(
        &self,
        directive: &Directive<'a>,
        user: Option<&str>,
    ) -> Result<ConfigLine<'a>, FailureReason> {
        if !directive.is_visible_to(user) {
            return Err(FailureReason::AccessDenied);
        }
        let slot = directive.config.ok_or(FailureReason::MissingConfigLine)?;
        self.decompose(slot.line, slot.terminator)
            .ok_or(FailureReason::MalformedLine)
    }

    /// Write `values`, keyed by hash, into the literals they address.
    ///
    /// Every directive carrying a requested hash is rewritten independently.
    /// A value equal to the literal's current widget value leaves the literal
    /// as written.
    /// Failures come in source order, followed by the requested hashes no
    /// directive carries, sorted.
    pub fn inject(
        &self,
        source: &str,
        values: &FxHashMap<CompactString, TagValue>,
        user: Option<&str>,
    ) -> InjectOutput {
        let mut edits: Vec<(Range<usize>, String)> = Vec::new();
        let mut failures = Vec::new();
        let mut seen: FxHashSet<CompactString> = FxHashSet::default();

        for directive in self.directives(source) {
            let Some((hash, value)) = directive.hash().and_then(|h| values.get_key_value(h)) else {
                continue;
            };
            seen.insert(hash.clone());

            match self.rewrite(&directive, value, user) {
                Ok(edit) => edits.push(edit),
                Err(reason) => {
                    tracing::debug!("inject {} failed: {}", hash, reason);
                    failures.push(InjectFailure {
                        hash: hash.clone(),
                        reason,
                    });
                }
            }
        }

        let mut unmatched: Vec<&CompactString> =
            values.keys().filter(|hash| !seen.contains(*hash)).collect();
        unmatched.sort();
        for hash in unmatched {
            tracing::debug!("inject {} failed: {}", hash, FailureReason::HashNotFound);
            failures.push(InjectFailure {
                hash: hash.clone(),
                reason: FailureReason::HashNotFound,
            });
        }

        InjectOutput {
            content: splice(source, &edits),
            failures,
        }
    }

    /// The replacement for one directive's config line.
    fn rewrite(
        &self,
        directive: &Directive<'_>,
        value: &TagValue,
        user: Option<&str>,
    ) -> Result<(Range<usize>, String), FailureReason> {
        let line = self.checked_line(directive, user)?;
        let literal = match extract(directive.tag, line.literal)? {
            (current, _) if current == *value => line.literal.to_string(),
            _ => render(directive.tag, line.literal, value)?,
        };
        let start = directive.config.map_or(0, |slot| slot.start);
        Ok((start..start + line.len(), line.with_literal(&literal)))
    }

    /// Give every directive without a hash a fresh one.
    #[inline]
    pub fn allocate_hashes(&self, source: &str) -> String {
        allocate(&self.grammar, source, &mut EntropyMint)
    }

    /// [`Palette::allocate_hashes`] with a caller-supplied identifier source.
    #[inline]
    pub fn allocate_hashes_with<M: IdMint>(&self, source: &str, mint: &mut M) -> String {
        allocate(&self.grammar, source, mint)
    }

    /// Remove every line holding a directive, terminator included.
    pub fn strip(&self, source: &str) -> String {
        let bytes = source.as_bytes();
        let mut out = String::with_capacity(source.len());
        let mut copied = 0;

        for raw in self.grammar.matches(source) {
            let line_start = memrchr2(b'\r', b'\n', &bytes[..raw.span.start]).map_or(0, |p| p + 1);
            let line_end = match &bytes[raw.span.end..] {
                [b'\r', b'\n', ..] => raw.span.end + 2,
                [b'\r' | b'\n', ..] => raw.span.end + 1,
                _ => raw.span.end,
            };
            out.push_str(&source[copied..line_start.max(copied)]);
            copied = copied.max(line_end);
        }

        out.push_str(&source[copied..]);
        out
    }
}

/// Apply non-overlapping, ascending edits.
fn splice(source: &str, edits: &[(Range<usize>, String)]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut copied = 0;
    for (range, text) in edits {
        if range.start < copied {
            continue;
        }
        out.push_str(&source[copied..range.start]);
        out.push_str(text);
        copied = range.end;
    }
    out.push_str(&source[copied..]);
    out
}
