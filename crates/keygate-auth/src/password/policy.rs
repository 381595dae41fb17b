//! Password strength policy enforcement.

/// The special characters the policy accepts.
const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Validates password strength.
///
/// Pure and deterministic. Applied at registration and password reset;
/// never enforced retroactively against already-stored hashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    /// Creates a new password policy.
    pub fn new() -> Self {
        Self
    }

    /// Checks whether a password satisfies every rule: at least 8
    /// characters, one uppercase letter, one lowercase letter, one digit,
    /// and one special character. There is no upper length bound.
    ///
    /// Length is measured in characters, not bytes. The character-class
    /// rules are ASCII-only (`A-Z`, `a-z`, `0-9` plus the fixed special
    /// set); non-ASCII characters count toward length but satisfy no class.
    pub fn is_valid(&self, password: &str) -> bool {
        if password.chars().count() < 8 {
            return false;
        }

        password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_digit())
            && password.chars().any(|c| SPECIAL_CHARS.contains(c))
    }

    /// Human-readable description of the rules, suitable for error messages.
    pub fn requirements(&self) -> &'static str {
        "Password must be at least 8 characters long and contain at least \
         one uppercase letter (A-Z), one lowercase letter (a-z), one digit \
         (0-9), and one special character (!@#$%^&* etc.)"
    }
}
