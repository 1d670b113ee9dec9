//! The L-System grammar and its memory-bounded rewriting renderer.
//!
//! A [`Grammar`] owns its alphabet, axiom, production rules and action bindings.
//! [`Grammar::render`] drives a [`Turtle`] through `rounds` levels of rewriting
//! by recursing over rule bodies in place, so the fully expanded string is never
//! built. Peak memory is one stack frame per level of rewriting.

use crate::bounds::BoundingBox;
use crate::error::{Error, Result};
use crate::symbol::{Symbol, SymbolTable};
use crate::turtle::{Turtle, TurtleOp};
use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::slice;
use tracing::debug;

/// Seed of the random stream used to pick between rule alternatives, unless
/// [`Grammar::with_seed`] says otherwise.
pub const DEFAULT_SEED: u64 = 0x4c53_7973_7465_6d21;

/// A (possibly stochastic) Lindenmayer system.
#[derive(Clone, Debug)]
pub struct Grammar {
    symbols: SymbolTable,
    /// Action name per symbol, indexed by symbol id.
    actions: Vec<Option<String>>,
    /// Alternative expansions per symbol, indexed by symbol id.
    rules: Vec<Vec<Vec<Symbol>>>,
    axiom: Vec<Symbol>,
    seed: u64,
}

/// Alias for readers who know the grammar as "the L-System".
pub type LSystem = Grammar;

impl Default for Grammar {
    fn default() -> Self {
        Self {
            symbols: SymbolTable::new(),
            actions: Vec::new(),
            rules: Vec::new(),
            axiom: Vec::new(),
            seed: DEFAULT_SEED,
        }
    }
}

impl Grammar {
    /// Creates an empty grammar. Populate it with [`set_action`](Self::set_action),
    /// [`set_axiom`](Self::set_axiom) and [`add_rule`](Self::add_rule).
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `seed` for the random stream every render starts from (builder pattern).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the symbol for `ch`, creating it on first reference.
    pub fn intern(&mut self, ch: char) -> Symbol {
        self.symbols.intern(ch)
    }

    /// Looks up an existing symbol.
    pub fn symbol(&self, ch: char) -> Option<Symbol> {
        self.symbols.resolve(ch)
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Binds the named action to the symbol for `ch`, replacing any earlier binding.
    ///
    /// The name is resolved by the turtle when rendering starts, so this never
    /// fails; an unknown name is reported by [`render`](Self::render).
    pub fn set_action(&mut self, ch: char, name: impl Into<String>) -> Symbol {
        let sym = self.symbols.intern(ch);
        let idx = sym.index();
        if idx >= self.actions.len() {
            self.actions.resize(idx + 1, None);
        }
        self.actions[idx] = Some(name.into());
        sym
    }

    /// The action name bound to `sym`, if any.
    pub fn action(&self, sym: Symbol) -> Option<&str> {
        self.actions.get(sym.index())?.as_deref()
    }

    /// Replaces the axiom with one symbol per character of `axiom`.
    pub fn set_axiom(&mut self, axiom: &str) {
        self.axiom = self.symbols.intern_str(axiom);
    }

    pub fn axiom(&self) -> &[Symbol] {
        &self.axiom
    }

    /// Appends one more alternative expansion for `ch`.
    ///
    /// Rules accumulate: two calls for the same character give it two
    /// alternatives, one of which is picked at random on every rewrite.
    pub fn add_rule(&mut self, ch: char, expansion: &str) {
        let sym = self.symbols.intern(ch);
        let body = self.symbols.intern_str(expansion);
        let idx = sym.index();
        if idx >= self.rules.len() {
            self.rules.resize_with(idx + 1, Vec::new);
        }
        self.rules[idx].push(body);
    }

    /// All alternative expansions of `sym`. Empty for terminal symbols.
    pub fn rules(&self, sym: Symbol) -> &[Vec<Symbol>] {
        self.rules
            .get(sym.index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Picks the expansion of `sym`, or `None` if `sym` is terminal.
    ///
    /// `rng` is only consulted when there is more than one alternative.
    pub fn rewrite<R: Rng + ?Sized>(&self, sym: Symbol, rng: &mut R) -> Option<&[Symbol]> {
        match self.rules(sym) {
            [] => None,
            [only] => Some(only.as_slice()),
            alternatives => alternatives.choose(rng).map(Vec::as_slice),
        }
    }

    /// The random stream a render starts from.
    pub fn fresh_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }

    /// Executes a single symbol against `turtle`: its bound action if it has
    /// one, the default convention otherwise.
    pub fn execute<T: Turtle + ?Sized>(&self, turtle: &mut T, sym: Symbol) -> Result<()> {
        let op = self.resolve_op(turtle, sym)?;
        turtle.apply(op);
        Ok(())
    }

    /// Renders the axiom. See [`render`](Self::render).
    pub fn render_axiom<T: Turtle + ?Sized>(
        &self,
        turtle: &mut T,
        rounds: i32,
    ) -> Result<BoundingBox> {
        self.render(turtle, &self.axiom, rounds)
    }

    /// Drives `turtle` through `rounds` levels of rewriting of `sequence` and
    /// returns the bounding box of every point it visited, starting point included.
    ///
    /// The random stream is reset from the grammar's seed first, so rendering
    /// the same grammar twice gives the same picture.
    ///
    /// # Rewriting
    ///
    /// At depth zero each symbol is executed. Above it, a symbol with rules is
    /// replaced by one of its expansions one level deeper, while a terminal
    /// symbol is executed right away instead of waiting out the remaining rounds.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `rounds` is negative, [`Error::UnknownAction`]
    /// if a bound action name means nothing to `turtle`. Both are reported before
    /// the turtle moves.
    pub fn render<T: Turtle + ?Sized>(
        &self,
        turtle: &mut T,
        sequence: &[Symbol],
        rounds: i32,
    ) -> Result<BoundingBox> {
        let rounds = u32::try_from(rounds).map_err(|_| {
            Error::invalid_argument(format!(
                "iteration count must be non-negative, got {rounds}"
            ))
        })?;
        let mut rng = self.fresh_rng();
        self.render_with_rng(turtle, sequence, rounds, &mut rng)
    }

    /// Like [`render`](Self::render), but draws choices from `rng` as-is.
    pub fn render_with_rng<T, R>(
        &self,
        turtle: &mut T,
        sequence: &[Symbol],
        rounds: u32,
        rng: &mut R,
    ) -> Result<BoundingBox>
    where
        T: Turtle + ?Sized,
        R: Rng + ?Sized,
    {
        let ops = self.resolve_ops(turtle)?;
        let mut bbox = BoundingBox::at(turtle.position());

        debug!(
            rounds,
            axiom_len = sequence.len(),
            alphabet = self.symbols.len(),
            "render started"
        );
        let executed = self.walk(turtle, &ops, sequence, rounds, rng, &mut bbox);
        debug!(
            executed,
            width = bbox.width(),
            height = bbox.height(),
            "render finished"
        );

        Ok(bbox)
    }

    /// Returns the number of symbols executed.
    fn walk<T, R>(
        &self,
        turtle: &mut T,
        ops: &[TurtleOp],
        sequence: &[Symbol],
        rounds: u32,
        rng: &mut R,
        bbox: &mut BoundingBox,
    ) -> u64
    where
        T: Turtle + ?Sized,
        R: Rng + ?Sized,
    {
        if rounds == 0 {
            for &sym in sequence {
                let op = ops
                    .get(sym.index())
                    .copied()
                    .unwrap_or_else(|| TurtleOp::default_for(sym.as_char()));
                turtle.apply(op);
                bbox.include(turtle.position());
            }
            return sequence.len() as u64;
        }

        let mut executed = 0;
        for sym in sequence {
            executed += match self.rewrite(*sym, rng) {
                Some(expansion) => self.walk(turtle, ops, expansion, rounds - 1, rng, bbox),
                None => self.walk(turtle, ops, slice::from_ref(sym), 0, rng, bbox),
            };
        }
        executed
    }

    /// Fails with [`Error::UnknownAction`] if `turtle` cannot resolve some
    /// bound action name.
    pub fn check_actions<T: Turtle + ?Sized>(&self, turtle: &T) -> Result<()> {
        self.resolve_ops(turtle).map(drop)
    }

    /// Resolves every symbol's operation once, indexed by symbol id.
    fn resolve_ops<T: Turtle + ?Sized>(&self, turtle: &T) -> Result<Vec<TurtleOp>> {
        self.symbols
            .iter()
            .map(|sym| self.resolve_op(turtle, sym))
            .collect()
    }

    fn resolve_op<T: Turtle + ?Sized>(&self, turtle: &T, sym: Symbol) -> Result<TurtleOp> {
        match self.action(sym) {
            Some(name) => turtle
                .resolve_action(name)
                .ok_or_else(|| Error::UnknownAction {
                    symbol: sym.as_char(),
                    name: name.to_owned(),
                }),
            None => Ok(TurtleOp::default_for(sym.as_char())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_accumulate() {
        let mut g = Grammar::new();
        g.add_rule('F', "F+F");
        g.add_rule('F', "F-F");
        let f = g.symbol('F').unwrap();
        assert_eq!(g.rules(f).len(), 2);
        assert_eq!(g.rules(g.symbol('+').unwrap()).len(), 0);
    }

    #[test]
    fn set_action_overwrites() {
        let mut g = Grammar::new();
        let plus = g.set_action('+', "turnL");
        g.set_action('+', "turnR");
        assert_eq!(g.action(plus), Some("turnR"));
        assert_eq!(g.symbols().len(), 1);
    }

    #[test]
    fn set_axiom_replaces() {
        let mut g = Grammar::new();
        g.set_axiom("AB");
        g.set_axiom("C");
        let axiom: String = g.axiom().iter().map(|s| s.as_char()).collect();
        assert_eq!(axiom, "C");
        assert_eq!(g.symbols().len(), 3);
    }

    #[test]
    fn every_referenced_symbol_is_registered_once() {
        let mut g = Grammar::new();
        g.set_action('[', "push");
        g.set_axiom("X");
        g.add_rule('X', "F[+X]F[-X]+X");
        g.add_rule('F', "FF");
        // X [ + ] - F
        assert_eq!(g.symbols().len(), 6);
        for sym in g.symbols().iter() {
            assert_eq!(g.symbol(sym.as_char()), Some(sym));
        }
    }

    #[test]
    fn single_alternative_does_not_touch_rng() {
        let mut g = Grammar::new();
        g.add_rule('F', "FF");
        let f = g.symbol('F').unwrap();

        let mut rng = g.fresh_rng();
        let mut untouched = g.fresh_rng();
        assert_eq!(g.rewrite(f, &mut rng).map(<[Symbol]>::len), Some(2));
        assert_eq!(rng.r#gen::<u64>(), untouched.r#gen::<u64>());
    }
}
