//! Edge case tests for the lexeme driver.
