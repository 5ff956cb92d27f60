use serde::{Deserialize, Serialize};

/// Display label derived from the stock level.
///
/// The backend computes this for every record it returns; the client only
/// recomputes it when it holds a stock value without a matching label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub fn from_stock(stock: i64) -> Self {
        if stock > 0 {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::OutOfStock => "Out of Stock",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
