use serde::{Deserialize, Deserializer, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId};

use crate::status::StockStatus;
use crate::unit::Unit;

/// A product record as last confirmed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProductRecord")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub unit: String,
    pub category: String,
    pub brand: String,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub status: String,
}

/// Wire shape; `status` may be missing from older backends.
#[derive(Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    unit: String,
    category: String,
    brand: String,
    stock: i64,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl From<ProductRecord> for Product {
    fn from(r: ProductRecord) -> Self {
        let status = r
            .status
            .unwrap_or_else(|| StockStatus::from_stock(r.stock).to_string());
        Self {
            id: r.id,
            name: r.name,
            unit: r.unit,
            category: r.category,
            brand: r.brand,
            stock: r.stock,
            image: r.image,
            status,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

impl Product {
    /// Shallow merge: every field present in `patch` overwrites ours, every
    /// absent field keeps its prior value. The id never changes.
    pub fn merge(&mut self, patch: &ProductPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(unit) = &patch.unit {
            self.unit = unit.clone();
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
        if let Some(brand) = &patch.brand {
            self.brand = brand.clone();
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
        if let Some(status) = &patch.status {
            self.status = status.clone();
        }
    }
}

/// Create payload: product fields minus the backend-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub unit: String,
    pub category: String,
    pub brand: String,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Default for NewProduct {
    fn default() -> Self {
        Self {
            name: String::new(),
            unit: Unit::default().to_string(),
            category: String::new(),
            brand: String::new(),
            stock: 0,
            image: None,
        }
    }
}

impl NewProduct {
    /// Form-level checks run before anything is sent.
    ///
    /// The first failing rule wins, in field order.
    pub fn validate(&self) -> DomainResult<()> {
        require(&self.name, "Product name is required")?;
        require(&self.unit, "Unit is required")?;
        require(&self.category, "Category is required")?;
        require(&self.brand, "Brand is required")?;
        if self.stock < 0 {
            return Err(DomainError::validation("Stock cannot be negative"));
        }
        Ok(())
    }

    /// Blank image URLs are sent as absent.
    pub fn normalized(mut self) -> Self {
        if self.image.as_deref().is_some_and(|s| s.trim().is_empty()) {
            self.image = None;
        }
        self
    }

    /// Validate, then normalize.
    pub fn prepared(self) -> DomainResult<Self> {
        self.validate()?;
        Ok(self.normalized())
    }
}

fn require(value: &str, message: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        Err(DomainError::validation(message))
    } else {
        Ok(())
    }
}

/// Partial product fields, used both as an update request body and to
/// decode update responses.
///
/// `image` distinguishes "absent" (`None`) from "explicitly cleared"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub image: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ProductPatch {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = Some(image);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == ProductPatch::default()
    }

    /// Fill in `status` from `stock` when only the stock is known.
    pub fn normalized(mut self) -> Self {
        if self.status.is_none() {
            if let Some(stock) = self.stock {
                self.status = Some(StockStatus::from_stock(stock).to_string());
            }
        }
        self
    }

    /// Reject values the form would have rejected.
    pub fn validate(&self) -> DomainResult<()> {
        let required = [
            (&self.name, "Product name is required"),
            (&self.unit, "Unit is required"),
            (&self.category, "Category is required"),
            (&self.brand, "Brand is required"),
        ];
        for (value, message) in required {
            if let Some(value) = value {
                require(value, message)?;
            }
        }
        if self.stock.is_some_and(|stock| stock < 0) {
            return Err(DomainError::validation("Stock cannot be negative"));
        }
        Ok(())
    }
}

/// The edit form submits every field.
impl From<NewProduct> for ProductPatch {
    fn from(p: NewProduct) -> Self {
        Self {
            name: Some(p.name),
            unit: Some(p.unit),
            category: Some(p.category),
            brand: Some(p.brand),
            stock: Some(p.stock),
            image: Some(p.image),
            status: None,
        }
    }
}

/// A full record is also a complete patch.
impl From<&Product> for ProductPatch {
    fn from(p: &Product) -> Self {
        Self {
            name: Some(p.name.clone()),
            unit: Some(p.unit.clone()),
            category: Some(p.category.clone()),
            brand: Some(p.brand.clone()),
            stock: Some(p.stock),
            image: Some(p.image.clone()),
            status: Some(p.status.clone()),
        }
    }
}
