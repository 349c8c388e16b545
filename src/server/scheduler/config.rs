pub mod reconciliation {
    /// Cron expression for retrying failed payment webhook reconciliations
    /// Runs every 5 minutes at the top of the minute
    pub const CRON_EXPRESSION: &str = "0 */5 * * * *";
}
