//! URL codec tests
//!
//! Wire-level behaviour of rewritten URLs: re-encoding fidelity, strict
//! rejections and relaxed recovery.
