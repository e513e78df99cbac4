//! Agent runtime - the conversational order-support pipeline
//!
//! This crate turns one raw user message plus an authenticated identity
//! into one safe user-facing reply:
//!
//! 1. **Sanitation** (`guardrails`) - strip denylisted tokens from the raw text
//! 2. **Intent classification** (`intent`) - one constrained LLM call, normalized
//!    into a closed three-label enum
//! 3. **Order reference resolution** (`resolver`) - strict-JSON extraction of the
//!    target order id from the user's own recent orders, with a fail-safe default
//! 4. **Ownership re-check** (`guardrails`) - code-level, backend-independent
//! 5. **Answer composition** (`answer`) - deterministic canned text for the
//!    safety-critical branches, one LLM call for the order status summary
//!
//! # Safety Principle
//!
//! The LLM is strictly a translator. It never writes SQL, never sees another
//! user's data, and never decides whether a record may be shown. Identity-level
//! gating (ownership, scope redirect, human handoff) lives in code; the model's
//! structured output is parsed strictly and falls back to asking for
//! clarification, never to a guessed order.

pub mod answer;
pub mod guardrails;
pub mod intent;
pub mod llm;
pub mod resolver;
pub mod runtime;

#[cfg(test)]
pub(crate) mod testing;
