//! Symmetric encryption built on reversible one-dimensional cellular
//! automata, after Wuensche and Lesser.
//!
//! A shared key is a randomly sampled chain-rule table (see [`RuleTable`]).
//! Encryption runs the automaton *backwards* from the plaintext, so that
//! decryption is nothing but running it forwards again; a keyed noise mask
//! (see [`mask`]) is XOR-ed into the plaintext first to diffuse structure.
//! The [`Automaton`] engine ties the pieces together, and [`Key`] carries
//! the rule table and step count to and from key files.
//!
//! This is a study of an encryption construction, not a production cipher:
//! the mask generator is a plain linear congruential generator and no
//! security claims are made for the scheme as a whole.


mod automaton;
mod cipher;
mod error;
mod key;
mod mask;
mod rule;

pub mod bits;
pub mod image;

pub use {
    automaton::Automaton,
    cipher::{Cipher, Ciphertext, Plaintext},
    error::{Error, Result},
    key::Key,
    mask::{mask, Eqadg},
    rule::{RuleTable, RULE_GEN_CUTOFF},
};
