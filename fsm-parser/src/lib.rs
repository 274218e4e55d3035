//! # fsm-parser
//!
//! A configurable finite state machine for parsing flat, loosely structured text into nested
//! document trees.
//!
//! File Layout
//!
//! The engine itself knows nothing about text: it is fed opaque fragments and hands back
//! whatever node type the caller defines. Everything that does know about text (chunking,
//! the bundled grammars, the document elements and their serializers) lives next to it:
//!
//! src/fsm
//!   ├── engine      The state machine: lookahead, grammar, transitions, driver, tracing
//!   ├── elements    A general purpose document tree usable as the engine's node type
//!   ├── chunking    Fragment sources (paragraphs, lines, pages)
//!   ├── grammars    Ready made grammars and the name registry
//!   ├── formats     Tree serializers (tag, treeviz, json, yaml)
//!   ├── loader      File/string loading glued to a named grammar
//!   └── testing     Fluent tree assertions
//!
//! For the testing conventions, see the [testing module](fsm::testing).

pub mod fsm;
