//! Restricted path queries over document trees
//!
//! A query names a parent element by path and selects some of its children
//! with a predicate:
//!
//! ```text
//! modules/module[.='foo']
//! dependencies/dependency[groupId='g' and artifactId='a']
//! /repositories/repository[id='central' or url='https://repo1']
//! ```
//!
//! Each test compares either the child's own value (`.`) or the value of one
//! of its element children against a quoted literal. `and` intersects the
//! matches collected so far with the next test, `or` (or no combinator at
//! all) unions them. Tests are applied left to right.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::tree::{Element, Node};

/// Left hand side of a test
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestKey {
    /// The candidate's own scalar value
    Value,
    /// The value of the candidate's first child with this name
    Child(String),
}

/// How a test combines with the matches collected before it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

/// A single `key='literal'` test
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Test {
    pub key: TestKey,
    pub literal: String,
}

impl Test {
    fn matches(&self, candidate: &Element) -> bool {
        let actual = match &self.key {
            TestKey::Value => candidate.value.as_deref(),
            TestKey::Child(name) => candidate.child(name).and_then(|c| c.value.as_deref()),
        };
        actual.unwrap_or("") == self.literal
    }
}

/// A parsed query expression
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathQuery {
    parent_path: Vec<String>,
    child: String,
    tests: Vec<(Combinator, Test)>,
}

fn expression_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^/?((?:[^/\[\]\s]+/)+)([^/\[\]\s]+)\[(.+)\]$").expect("valid query pattern")
    })
}

fn test_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\.|[A-Za-z_][\w.\-]*)\s*=\s*'([^']*)'").expect("valid test pattern")
    })
}

fn combinator_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(and|or)\s+").expect("valid combinator pattern"))
}

impl PathQuery {
    /// Parse a query expression
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedQuery` unless the whole expression matches the
    /// grammar.
    pub fn parse(expression: &str) -> Result<Self> {
        let malformed = |message: &str| Error::MalformedQuery {
            query: expression.to_string(),
            message: message.to_string(),
        };

        let captures = expression_pattern()
            .captures(expression.trim())
            .ok_or_else(|| malformed("expected parent/child[predicate]"))?;

        let parent_path = captures[1]
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        let child = captures[2].to_string();
        let tests = parse_tests(&captures[3]).map_err(|m| malformed(&m))?;

        Ok(Self {
            parent_path,
            child,
            tests,
        })
    }

    /// Name of the children this query selects among
    pub fn child_name(&self) -> &str {
        &self.child
    }

    /// Path of the parent element, relative to the root
    pub fn parent_path(&self) -> &[String] {
        &self.parent_path
    }

    /// Walk from `root` to the parent element named by this query
    ///
    /// Returns `None` when any segment is missing.
    pub fn resolve_parent<'a>(&self, root: &'a Element) -> Option<&'a Element> {
        self.parent_path
            .iter()
            .try_fold(root, |element, segment| element.child(segment))
    }

    pub fn resolve_parent_mut<'a>(&self, root: &'a mut Element) -> Option<&'a mut Element> {
        let mut current = root;
        for segment in &self.parent_path {
            current = current.child_mut(segment)?;
        }
        Some(current)
    }

    /// Indices of the matching children of the resolved parent
    ///
    /// Indices refer to the parent's `children` vector, comments included,
    /// and are returned in document order. A missing parent yields an empty
    /// selection.
    pub fn select(&self, root: &Element) -> Vec<usize> {
        self.resolve_parent(root)
            .map(|parent| self.select_in(parent))
            .unwrap_or_default()
    }

    /// Evaluate the predicate against the children of an already resolved parent
    pub fn select_in(&self, parent: &Element) -> Vec<usize> {
        let candidates: Vec<(usize, &Element)> = parent
            .children
            .iter()
            .enumerate()
            .filter_map(|(index, node)| match node {
                Node::Element(element) if element.name == self.child => Some((index, element)),
                _ => None,
            })
            .collect();

        let mut selected = BTreeSet::new();
        for (position, (combinator, test)) in self.tests.iter().enumerate() {
            let matching: BTreeSet<usize> = candidates
                .iter()
                .filter(|(_, element)| test.matches(element))
                .map(|(index, _)| *index)
                .collect();

            if position == 0 {
                selected = matching;
                continue;
            }
            selected = match combinator {
                Combinator::And => selected.intersection(&matching).copied().collect(),
                Combinator::Or => selected.union(&matching).copied().collect(),
            };
        }

        selected.into_iter().collect()
    }

    /// Remove every match, returning how many children were removed
    pub fn remove_matches(&self, root: &mut Element) -> usize {
        match self.resolve_parent_mut(root) {
            Some(parent) => {
                let indices = self.select_in(parent);
                parent.remove_indices(&indices)
            }
            None => 0,
        }
    }
}

fn parse_tests(predicate: &str) -> std::result::Result<Vec<(Combinator, Test)>, String> {
    let mut tests = Vec::new();
    let mut rest = predicate.trim_start();

    while !rest.is_empty() {
        let mut combinator = Combinator::Or;
        if !tests.is_empty() {
            if let Some(found) = combinator_pattern().captures(rest) {
                combinator = if &found[1] == "and" {
                    Combinator::And
                } else {
                    Combinator::Or
                };
                rest = &rest[found[0].len()..];
            }
        }

        let captures = test_pattern()
            .captures(rest)
            .ok_or_else(|| format!("expected key='value' at '{}'", rest))?;
        let key = match &captures[1] {
            "." => TestKey::Value,
            name => TestKey::Child(name.to_string()),
        };
        tests.push((
            combinator,
            Test {
                key,
                literal: captures[2].to_string(),
            },
        ));

        let consumed = captures[0].len();
        let after = &rest[consumed..];
        let trimmed = after.trim_start();
        if !trimmed.is_empty() && trimmed.len() == after.len() {
            return Err(format!("expected whitespace after test at '{}'", after));
        }
        rest = trimmed;
    }

    if tests.is_empty() {
        return Err("empty predicate".to_string());
    }
    Ok(tests)
}

/// Quote a literal for use inside a query, rejecting embedded quotes
pub fn literal(value: &str) -> Result<String> {
    if value.contains('\'') {
        return Err(Error::MalformedQuery {
            query: value.to_string(),
            message: "literals cannot contain a single quote".to_string(),
        });
    }
    Ok(format!("'{}'", value))
}
