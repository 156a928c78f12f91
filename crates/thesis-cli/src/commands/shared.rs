/// Compute effective limit with precedence: global flag -> configured default.
#[must_use]
pub fn effective_limit(flag: Option<u32>, configured: u32) -> u32 {
    flag.filter(|l| *l > 0).unwrap_or(configured)
}
