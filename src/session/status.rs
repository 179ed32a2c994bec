/// Why the texting-closed dialog is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningReason {
    AlmostClosed,
    FiveMinutes,
    OutsideHours,
    CampaignClosed,
}

impl WarningReason {
    pub fn title(&self) -> &'static str {
        match self {
            WarningReason::AlmostClosed => "Texting Hours Almost Over",
            WarningReason::FiveMinutes => "5 Minutes Left",
            WarningReason::OutsideHours => "Outside Texting Hours",
            WarningReason::CampaignClosed => "Campaign Closed",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            WarningReason::AlmostClosed => {
                "Texting hours for this campaign end in less than 5 minutes. Please wrap up your conversations."
            }
            WarningReason::FiveMinutes => {
                "Texting hours for this campaign end in 5 minutes. Please wrap up your conversations."
            }
            WarningReason::OutsideHours => {
                "It is currently outside of texting hours for this campaign. Please come back during texting hours."
            }
            WarningReason::CampaignClosed => "This campaign is no longer accepting texts.",
        }
    }

    /// The heads-up warnings; acknowledging one keeps the session going.
    pub fn is_heads_up(&self) -> bool {
        matches!(self, WarningReason::AlmostClosed | WarningReason::FiveMinutes)
    }
}

/// Where a texting session stands. Every status except `Active` and `Ended`
/// carries exactly one warning, and the dialog is open iff there is one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    WarnAlmostClosed,
    WarnFiveMin,
    WarnOutsideHours,
    BlockedCampaignClosed,
    Ended,
}

impl SessionStatus {
    pub fn from_warning(reason: WarningReason) -> Self {
        match reason {
            WarningReason::AlmostClosed => SessionStatus::WarnAlmostClosed,
            WarningReason::FiveMinutes => SessionStatus::WarnFiveMin,
            WarningReason::OutsideHours => SessionStatus::WarnOutsideHours,
            WarningReason::CampaignClosed => SessionStatus::BlockedCampaignClosed,
        }
    }

    pub fn warning(&self) -> Option<WarningReason> {
        match self {
            SessionStatus::WarnAlmostClosed => Some(WarningReason::AlmostClosed),
            SessionStatus::WarnFiveMin => Some(WarningReason::FiveMinutes),
            SessionStatus::WarnOutsideHours => Some(WarningReason::OutsideHours),
            SessionStatus::BlockedCampaignClosed => Some(WarningReason::CampaignClosed),
            SessionStatus::Active | SessionStatus::Ended => None,
        }
    }

    pub fn dialog_open(&self) -> bool {
        self.warning().is_some()
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionStatus::Active => "ACTIVE",
            SessionStatus::WarnAlmostClosed => "WARN_ALMOST_CLOSED",
            SessionStatus::WarnFiveMin => "WARN_FIVE_MIN",
            SessionStatus::WarnOutsideHours => "WARN_OUTSIDE_HOURS",
            SessionStatus::BlockedCampaignClosed => "BLOCKED_CAMPAIGN_CLOSED",
            SessionStatus::Ended => "ENDED",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_round_trips_through_status() {
        for reason in [
            WarningReason::AlmostClosed,
            WarningReason::FiveMinutes,
            WarningReason::OutsideHours,
            WarningReason::CampaignClosed,
        ] {
            let status = SessionStatus::from_warning(reason);
            assert_eq!(status.warning(), Some(reason));
            assert!(status.dialog_open());
        }
    }

    #[test]
    fn test_no_dialog_when_active_or_ended() {
        assert!(!SessionStatus::Active.dialog_open());
        assert!(!SessionStatus::Ended.dialog_open());
    }
}
