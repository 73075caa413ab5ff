//! Directory-scoped stack of ignore pattern groups
//!
//! A walker pushes one group when it enters a directory that carries ignore
//! rules and pops it when it leaves. Queries look at the deepest group first,
//! and the first group in which any pattern matches decides on its own:
//! shallower groups are never consulted after that, even when the deciding
//! match was a negation.

use crate::core::paths::{escapes_base, relative_to, to_slash};
use crate::ignore::wildpath;
use serde::Serialize;
use std::ops::{Deref, DerefMut};

/// A single rule as written in an ignore file, with its derived attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRule<'a> {
    /// The rule with `!` and the leading `/` removed
    pub body: &'a str,
    /// Rule started with `!`
    pub negated: bool,
    /// Rule started with `/` (after any `!`)
    pub anchored: bool,
    /// Rule ended with `/`
    pub directory_only: bool,
}

impl<'a> PatternRule<'a> {
    /// Derive the attributes of a raw rule
    pub fn parse(raw: &'a str) -> Self {
        let (negated, rest) = match raw.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (anchored, body) = match rest.strip_prefix('/') {
            Some(body) => (true, body),
            None => (false, rest),
        };

        Self {
            body,
            negated,
            anchored,
            directory_only: body.ends_with('/'),
        }
    }

    /// Whether this rule matches a base-relative path
    pub fn matches(&self, rel_path: &str) -> bool {
        if self.directory_only {
            // only descendants of the directory, never the directory entry
            let stem = self.body.trim_end_matches('/');
            return wildpath::matches(&format!("**/{stem}/**/*"), rel_path)
                || wildpath::matches(&format!("{stem}/**/*"), rel_path);
        }

        if !self.body.contains('/') {
            return wildpath::matches(&format!("**/{}", self.body), rel_path)
                || wildpath::matches(self.body, rel_path);
        }

        wildpath::matches(self.body, rel_path)
    }
}

/// The rule that decided a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoreMatch {
    /// Depth of the deciding group, 0 being the root
    pub depth: usize,
    /// The deciding rule as it was pushed
    pub pattern: String,
    /// Final verdict for the path
    pub ignored: bool,
}

/// Ordered pattern groups, one per directory depth
#[derive(Debug, Clone, Default)]
pub struct IgnoreStack {
    groups: Vec<Vec<String>>,
    base_path: String,
}

impl IgnoreStack {
    /// Create an empty stack whose queries are resolved against `base_path`
    pub fn new(base_path: &str) -> Self {
        Self {
            groups: Vec::new(),
            base_path: to_slash(base_path),
        }
    }

    /// Push a new group of rules for the directory being entered
    pub fn push<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let group = patterns
            .into_iter()
            .map(|pattern| to_slash(pattern.as_ref()))
            .collect();
        self.groups.push(group);
    }

    /// Drop the deepest group. Popping an empty stack does nothing.
    pub fn pop(&mut self) {
        self.groups.pop();
    }

    /// Push `patterns` (if any) and pop them again when the guard goes out of scope
    pub fn scope<I, S>(&mut self, patterns: Option<I>) -> StackGuard<'_>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pushed = match patterns {
            Some(patterns) => {
                self.push(patterns);
                true
            },
            None => false,
        };
        StackGuard {
            stack: self,
            pushed,
        }
    }

    /// Number of groups currently pushed
    pub fn depth(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Whether `path` is ignored by the active groups
    pub fn should_ignore(&self, path: &str) -> bool {
        self.explain(path).is_some_and(|decision| decision.ignored)
    }

    /// Find the rule that decides `path`, if any rule matches at all
    pub fn explain(&self, path: &str) -> Option<IgnoreMatch> {
        let rel_path = relative_to(&self.base_path, &to_slash(path))?;
        if escapes_base(&rel_path) {
            return None;
        }

        for (depth, group) in self.groups.iter().enumerate().rev() {
            let mut decision: Option<IgnoreMatch> = None;

            for raw in group.iter().filter(|raw| !raw.is_empty()) {
                let rule = PatternRule::parse(raw);
                if rule.matches(&rel_path) {
                    // later rules in the same group override earlier ones
                    decision = Some(IgnoreMatch {
                        depth,
                        pattern: raw.clone(),
                        ignored: !rule.negated,
                    });
                }
            }

            if decision.is_some() {
                return decision;
            }
        }

        None
    }
}

/// Scope guard returned by [`IgnoreStack::scope`]
///
/// Dereferences to the stack so the scope's own queries and nested scopes go
/// through it.
#[derive(Debug)]
pub struct StackGuard<'a> {
    stack: &'a mut IgnoreStack,
    pushed: bool,
}

impl StackGuard<'_> {
    /// Whether this scope pushed a group
    pub fn pushed(&self) -> bool {
        self.pushed
    }
}

impl Deref for StackGuard<'_> {
    type Target = IgnoreStack;

    fn deref(&self) -> &IgnoreStack {
        self.stack
    }
}

impl DerefMut for StackGuard<'_> {
    fn deref_mut(&mut self) -> &mut IgnoreStack {
        self.stack
    }
}

impl Drop for StackGuard<'_> {
    fn drop(&mut self) {
        if self.pushed {
            self.stack.pop();
        }
    }
}
