//! Derived monthly metrics: accounts, transaction volumes and revenue

use serde::{Deserialize, Serialize};

pub const ACCOUNTS_INPUT: &str = "Accounts";
pub const ACTIVE_SHARE_INPUT: &str = "ActiveShare";
pub const CHECKING_SHARE_INPUT: &str = "CheckingShare";
pub const SAVING_SHARE_INPUT: &str = "SavingShare";

/// Payment channel with its own per-active volume rate and per-transaction fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    AchIncoming,
    AchOutgoing,
    RtpIncoming,
    RtpOutgoing,
    WireIncoming,
    WireOutgoing,
    DebitCard,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::AchIncoming,
        Channel::AchOutgoing,
        Channel::RtpIncoming,
        Channel::RtpOutgoing,
        Channel::WireIncoming,
        Channel::WireOutgoing,
        Channel::DebitCard,
    ];

    /// Column-style key used in exported tables
    pub fn key(&self) -> &'static str {
        match self {
            Channel::AchIncoming => "ach_incoming",
            Channel::AchOutgoing => "ach_outgoing",
            Channel::RtpIncoming => "rtp_incoming",
            Channel::RtpOutgoing => "rtp_outgoing",
            Channel::WireIncoming => "wire_incoming",
            Channel::WireOutgoing => "wire_outgoing",
            Channel::DebitCard => "debit_card",
        }
    }

    /// Input type giving transactions per active account
    pub fn volume_input(&self) -> &'static str {
        match self {
            Channel::AchIncoming => "ACHinPerActive",
            Channel::AchOutgoing => "ACHoutPerActive",
            Channel::RtpIncoming => "RTPinPerActive",
            Channel::RtpOutgoing => "RTPoutPerActive",
            Channel::WireIncoming => "WireInPerActive",
            Channel::WireOutgoing => "WireOutPerActive",
            Channel::DebitCard => "DebitCardTransactionsPerActive",
        }
    }

    /// Input type giving revenue per transaction
    pub fn fee_input(&self) -> &'static str {
        match self {
            Channel::AchIncoming => "ACHinRate",
            Channel::AchOutgoing => "ACHoutRate",
            Channel::RtpIncoming => "RTPinRate",
            Channel::RtpOutgoing => "RTPoutRate",
            Channel::WireIncoming => "WireInRate",
            Channel::WireOutgoing => "WireOutRate",
            Channel::DebitCard => "DebitCardTransactionRate",
        }
    }
}

/// One value per channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelValues {
    pub ach_incoming: f64,
    pub ach_outgoing: f64,
    pub rtp_incoming: f64,
    pub rtp_outgoing: f64,
    pub wire_incoming: f64,
    pub wire_outgoing: f64,
    pub debit_card: f64,
}

impl ChannelValues {
    pub fn from_fn<F: FnMut(Channel) -> f64>(mut f: F) -> Self {
        Self {
            ach_incoming: f(Channel::AchIncoming),
            ach_outgoing: f(Channel::AchOutgoing),
            rtp_incoming: f(Channel::RtpIncoming),
            rtp_outgoing: f(Channel::RtpOutgoing),
            wire_incoming: f(Channel::WireIncoming),
            wire_outgoing: f(Channel::WireOutgoing),
            debit_card: f(Channel::DebitCard),
        }
    }

    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::AchIncoming => self.ach_incoming,
            Channel::AchOutgoing => self.ach_outgoing,
            Channel::RtpIncoming => self.rtp_incoming,
            Channel::RtpOutgoing => self.rtp_outgoing,
            Channel::WireIncoming => self.wire_incoming,
            Channel::WireOutgoing => self.wire_outgoing,
            Channel::DebitCard => self.debit_card,
        }
    }

    pub fn total(&self) -> f64 {
        Channel::ALL.iter().map(|&c| self.get(c)).sum()
    }
}

/// Stage 1 output
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountMetrics {
    /// Scenario-adjusted total accounts
    pub total: f64,
    pub active: f64,
    pub checking: f64,
    pub savings: f64,
}

/// Stage 2 output
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionMetrics {
    #[serde(flatten)]
    pub volumes: ChannelValues,
    pub total_volume: f64,
}

impl TransactionMetrics {
    pub fn new(volumes: ChannelValues) -> Self {
        Self {
            total_volume: volumes.total(),
            volumes,
        }
    }
}

/// Stage 3 output
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueMetrics {
    #[serde(flatten)]
    pub revenue: ChannelValues,
    pub total_revenue: f64,
}

impl RevenueMetrics {
    pub fn new(revenue: ChannelValues) -> Self {
        Self {
            total_revenue: revenue.total(),
            revenue,
        }
    }
}

/// Full derived record for one (month, scenario)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub month: u32,
    pub scenario: String,
    pub accounts: AccountMetrics,
    pub transactions: TransactionMetrics,
    pub revenue: RevenueMetrics,
}

impl DerivedMetrics {
    /// Total revenue per (scenario-adjusted) account, 0 when there are no accounts
    pub fn revenue_per_account(&self) -> f64 {
        ratio_or_zero(self.revenue.total_revenue, self.accounts.total)
    }
}

/// `numerator / denominator`, or 0 when the denominator is 0
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_values_total() {
        let values = ChannelValues::from_fn(|c| match c {
            Channel::DebitCard => 10.0,
            _ => 1.0,
        });
        assert_eq!(values.total(), 16.0);
        assert_eq!(values.get(Channel::DebitCard), 10.0);
        assert_eq!(values.get(Channel::WireOutgoing), 1.0);
    }

    #[test]
    fn test_channel_inputs_distinct() {
        let mut names: Vec<&str> = Channel::ALL
            .iter()
            .flat_map(|c| [c.volume_input(), c.fee_input()])
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 14);
    }

    #[test]
    fn test_revenue_per_account_zero_accounts() {
        let record = DerivedMetrics {
            month: 1,
            scenario: "Base".into(),
            accounts: AccountMetrics::default(),
            transactions: TransactionMetrics::default(),
            revenue: RevenueMetrics::new(ChannelValues::from_fn(|_| 5.0)),
        };
        assert_eq!(record.revenue_per_account(), 0.0);
        assert_eq!(ratio_or_zero(1.0, 0.0), 0.0);
        assert_eq!(ratio_or_zero(6.0, 3.0), 2.0);
    }

    #[test]
    fn test_channel_columns_are_flat_in_json() {
        let volumes = ChannelValues::from_fn(|_| 2.0);
        let record = DerivedMetrics {
            month: 12,
            scenario: "Base".into(),
            accounts: AccountMetrics::default(),
            transactions: TransactionMetrics::new(volumes),
            revenue: RevenueMetrics::new(ChannelValues::from_fn(|_| 0.5)),
        };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["transactions"]["ach_incoming"], 2.0);
        assert_eq!(json["transactions"]["total_volume"], 14.0);
        assert!(json["transactions"].get("volumes").is_none());
        assert_eq!(json["revenue"]["debit_card"], 0.5);
        assert_eq!(json["revenue"]["total_revenue"], 3.5);
        assert!(json["revenue"].get("revenue").is_none());
    }
}
