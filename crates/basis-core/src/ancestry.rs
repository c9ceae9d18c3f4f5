use crate::library::Lib;
use std::fmt;

/// An ordered sequence of libs denoting ancestry from a top-level dep to
/// (but not including) the current one. The empty ancestry denotes a top dep.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ancestry(Vec<Lib>);

impl Ancestry {
    pub fn top() -> Self {
        Ancestry(Vec::new())
    }

    pub fn is_top(&self) -> bool {
        self.0.is_empty()
    }

    pub fn extend(&self, lib: Lib) -> Ancestry {
        let mut libs = self.0.clone();
        libs.push(lib);
        Ancestry(libs)
    }

    pub fn last(&self) -> Option<&Lib> {
        self.0.last()
    }

    /// This ancestry with its last element removed, and the removed element,
    /// or `None` if this ancestry is already top.
    pub fn split_last(&self) -> Option<(Ancestry, &Lib)> {
        let (last, rest) = self.0.split_last()?;
        Some((Ancestry(rest.to_vec()), last))
    }

    pub fn libs(&self) -> &[Lib] {
        &self.0
    }

    /// Every prefix of this ancestry, from itself down to (and including) top,
    /// in that order: used by exclusion lookups to check each enclosing scope.
    pub fn prefixes(&self) -> impl Iterator<Item = Ancestry> + '_ {
        let n = self.0.len();
        (0..=n).rev().map(move |i| Ancestry(self.0[..i].to_vec()))
    }
}

impl fmt::Display for Ancestry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<top>");
        }
        let rendered: Vec<_> = self.0.iter().map(|l| l.to_string()).collect();
        f.write_str(&rendered.join(" -> "))
    }
}
