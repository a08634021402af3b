//! The caller's visible names, captured as an explicit symbol table.
//!
//! A schema's annotations may reference names that only the call site
//! knows: user classes and type aliases. Instead of introspecting the
//! caller, the embedding application hands a [`SymbolTable`] to the
//! validator with whatever names its annotations need. Lookups shadow the
//! builtin type names.

use std::collections::HashMap;

use crate::ast::TypeExpr;
use crate::error::CompileError;
use crate::parser;

/// A user-declared class and its direct base classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    pub name: String,
    pub bases: Vec<String>,
}

#[derive(Debug, Clone)]
pub(crate) enum Symbol {
    Class(ClassDef),
    Alias(TypeExpr),
}

/// Mapping of caller-visible names to type meanings.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    /// Create an empty table. Builtin type names (`int`, `str`, ...) are
    /// always resolvable and need no entry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a class with no bases.
    pub fn define_class(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.symbols.insert(
            name.clone(),
            Symbol::Class(ClassDef {
                name,
                bases: Vec::new(),
            }),
        );
    }

    /// Declare a class with the given direct base classes.
    pub fn define_class_with_bases(&mut self, name: impl Into<String>, bases: &[&str]) {
        let name = name.into();
        self.symbols.insert(
            name.clone(),
            Symbol::Class(ClassDef {
                name,
                bases: bases.iter().map(|b| b.to_string()).collect(),
            }),
        );
    }

    /// Declare a type alias, e.g. `UserId` for `int`. The target is parsed
    /// as an annotation immediately; a malformed target fails here rather
    /// than at first use.
    pub fn define_alias(
        &mut self,
        name: impl Into<String>,
        target: &str,
    ) -> Result<(), CompileError> {
        let expr = parser::parse_type_text(target).map_err(|errs| {
            let messages: Vec<String> = errs.iter().map(|e| e.to_string()).collect();
            CompileError::BadAnnotation {
                text: target.to_string(),
                message: messages.join("; "),
            }
        })?;
        self.symbols.insert(name.into(), Symbol::Alias(expr));
        Ok(())
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// True if `class` is `ancestor` or transitively derives from it.
    pub fn is_subclass(&self, class: &str, ancestor: &str) -> bool {
        if class == ancestor {
            return true;
        }
        let mut pending = vec![class.to_string()];
        let mut seen: Vec<String> = Vec::new();
        while let Some(current) = pending.pop() {
            if seen.contains(&current) {
                continue;
            }
            if let Some(Symbol::Class(def)) = self.symbols.get(&current) {
                for base in &def.bases {
                    if base == ancestor {
                        return true;
                    }
                    pending.push(base.clone());
                }
            }
            seen.push(current);
        }
        false
    }

    /// All declared classes that are `ancestor` or derive from it,
    /// `ancestor` itself included. Sorted, for determinism.
    pub fn subclasses_of(&self, ancestor: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .symbols
            .iter()
            .filter_map(|(name, sym)| match sym {
                Symbol::Class(_) if self.is_subclass(name, ancestor) => Some(name.clone()),
                _ => None,
            })
            .collect();
        if !names.iter().any(|n| n == ancestor) {
            names.push(ancestor.to_string());
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_is_its_own_subclass() {
        let mut env = SymbolTable::new();
        env.define_class("A");
        assert!(env.is_subclass("A", "A"));
    }

    #[test]
    fn direct_and_transitive_bases() {
        let mut env = SymbolTable::new();
        env.define_class("Base");
        env.define_class_with_bases("Mid", &["Base"]);
        env.define_class_with_bases("Leaf", &["Mid"]);
        assert!(env.is_subclass("Mid", "Base"));
        assert!(env.is_subclass("Leaf", "Base"));
        assert!(!env.is_subclass("Base", "Leaf"));
    }

    #[test]
    fn base_cycles_terminate() {
        let mut env = SymbolTable::new();
        env.define_class_with_bases("A", &["B"]);
        env.define_class_with_bases("B", &["A"]);
        assert!(env.is_subclass("A", "B"));
        assert!(!env.is_subclass("A", "C"));
    }

    #[test]
    fn subclasses_are_sorted_and_include_ancestor() {
        let mut env = SymbolTable::new();
        env.define_class("Animal");
        env.define_class_with_bases("Dog", &["Animal"]);
        env.define_class_with_bases("Cat", &["Animal"]);
        env.define_class("Rock");
        assert_eq!(
            env.subclasses_of("Animal"),
            vec!["Animal".to_string(), "Cat".to_string(), "Dog".to_string()]
        );
    }

    #[test]
    fn alias_with_bad_target_fails_at_definition() {
        let mut env = SymbolTable::new();
        assert!(env.define_alias("Broken", "[not a type]").is_err());
        assert!(env.define_alias("UserId", "int").is_ok());
    }
}
