//! End-to-end runs of the probe suite.
