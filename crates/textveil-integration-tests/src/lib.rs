//! End-to-end integration tests for TextVeil
//!
//! These tests wire pattern detection, a stand-in NER model and the
//! placeholder registry together to verify the full sanitize and
//! restore flow.
