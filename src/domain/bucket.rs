use serde::{Deserialize, Serialize};

/// A display panel on the board.
///
/// Buckets form a closed set. A record lands in at most one of them per
/// classification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bucket {
    AwaitingPicking,
    InPicking,
    AwaitingChecking,
    Checked,
    ReadyForCheckout,
    ReadyForPickup,
}

impl Bucket {
    /// Panel title shown to people on the floor.
    pub fn label(self) -> &'static str {
        match self {
            Bucket::AwaitingPicking => "Awaiting Picking",
            Bucket::InPicking => "In Picking",
            Bucket::AwaitingChecking => "Awaiting Checking",
            Bucket::Checked => "Checked",
            Bucket::ReadyForCheckout => "Ready for Checkout",
            Bucket::ReadyForPickup => "Ready for Pickup",
        }
    }

    /// Terminal buckets only show a record for a bounded window after checking.
    pub fn is_terminal(self) -> bool {
        matches!(self, Bucket::ReadyForCheckout | Bucket::ReadyForPickup)
    }
}

/// Which set of panels a board shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoardLayout {
    /// Customer-facing board: work in progress plus "come to the checkout" and
    /// "collect your order" panels.
    #[default]
    Customer,
    /// Internal board: one panel per warehouse status.
    Operations,
}

impl BoardLayout {
    /// Panels in display order.
    pub fn buckets(self) -> &'static [Bucket] {
        match self {
            BoardLayout::Customer => &[
                Bucket::AwaitingPicking,
                Bucket::AwaitingChecking,
                Bucket::ReadyForCheckout,
                Bucket::ReadyForPickup,
            ],
            BoardLayout::Operations => &[
                Bucket::AwaitingPicking,
                Bucket::InPicking,
                Bucket::AwaitingChecking,
                Bucket::Checked,
            ],
        }
    }
}

/// Row ordering inside a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Newest order first; order ids grow monotonically.
    #[default]
    OrderIdDesc,
    /// Alphabetical by displayed customer name.
    CustomerNameAsc,
}
