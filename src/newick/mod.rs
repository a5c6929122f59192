//! Newick format writer for compatibility trees.
//!
//! A compatibility tree is written with its leaves named by taxon and every
//! internal vertex named by the character introduced on the edge above it:
//! ```text
//! (((1)c2)c1,(2)c3,3);
//! ((1,(((2)'c2:1>2',3)'c1:1>2',4)'c2:0>1')'c1:0>1');
//! ```
//! The first tree is binary (labels `c<k>`), the second has state
//! transitions as labels (`c<k>:<from>><to>`, quoted since they contain `:`).
//!
//! # API
//! * [`to_newick`] - one tree as Newick string
//! * [`write_newick_file`] - several trees, one per line

mod label;
pub mod writer;

pub use self::label::escape_label;
pub use self::writer::{NewickStyle, to_newick, write_newick_file};
