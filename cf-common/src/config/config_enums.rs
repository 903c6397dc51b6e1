use strum::{Display, EnumString, IntoStaticStr};

#[derive(Debug, Clone, PartialEq, Default, Display, EnumString, IntoStaticStr)]
pub enum RunMode {
    /// recurring run, silent
    #[default]
    #[strum(serialize = "scheduled")]
    Scheduled,
    /// operator triggered run, reports progress and may force a collation
    #[strum(serialize = "on_demand")]
    OnDemand,
}
