//! Propositional knowledge about the board and the inference that runs on it.
//!
//! A [`Statement`] says "exactly `count` of these cells are mines". The
//! [`KnowledgeBase`] holds the confirmed mines and safe cells alongside every
//! statement not yet resolved, and after each reveal it:
//! - propagates newly confirmed cells into every statement,
//! - resolves statements whose truth is fully determined,
//! - weakens any statement that strictly contains another one by subtracting
//!   the smaller statement's cells and count.
//!
//! Move selection reads the result; see [`KnowledgeBase::next_move`].

mod base;
mod selector;
mod statement;

pub use base::KnowledgeBase;
pub use selector::Move;
pub use statement::Statement;
