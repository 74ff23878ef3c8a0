use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BidPackage, VendorBidStatus};

/// Side-by-side bid tab for one package: breakdown items as rows, vendors
/// as columns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMatrix {
    pub cost_code: String,
    pub budget: Decimal,
    pub vendors: Vec<MatrixVendor>,
    pub rows: Vec<MatrixRow>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixVendor {
    pub id: String,
    pub name: String,
    pub base_bid: Decimal,
    pub status: VendorBidStatus,
    pub recommended: bool,
    pub rating: Decimal,
    /// Base bid minus package budget; positive means over budget.
    pub budget_delta: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixRow {
    pub item: String,
    /// One cell per vendor, in vendor-list order. `None` where the vendor
    /// did not price the item.
    pub cells: Vec<Option<MatrixCell>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixCell {
    pub qty: String,
    pub unit_price: Decimal,
    pub amount: Decimal,
    pub lowest: bool,
}

/// Builds the matrix. Row order is first-seen across vendors in vendor-list
/// order. A cell is marked lowest only when at least two vendors priced the
/// item; ties are all marked.
pub fn comparison_matrix(package: &BidPackage) -> ComparisonMatrix {
    let mut items: Vec<String> = Vec::new();
    for vendor in &package.vendors {
        for line in &vendor.breakdown {
            if !items.contains(&line.item) {
                items.push(line.item.clone());
            }
        }
    }

    let mut rows = Vec::with_capacity(items.len());
    for item in &items {
        let mut cells: Vec<Option<MatrixCell>> = package
            .vendors
            .iter()
            .map(|vendor| {
                vendor.breakdown.iter().find(|l| &l.item == item).map(|l| MatrixCell {
                    qty: l.qty.clone(),
                    unit_price: l.unit_price,
                    amount: l.amount,
                    lowest: false,
                })
            })
            .collect();

        let priced: Vec<Decimal> = cells
            .iter()
            .filter_map(|c| c.as_ref().map(|c| c.amount))
            .collect();
        if priced.len() > 1 {
            if let Some(low) = priced.iter().copied().min() {
                for cell in cells.iter_mut().flatten() {
                    if cell.amount == low {
                        cell.lowest = true;
                    }
                }
            }
        }
        rows.push(MatrixRow {
            item: item.clone(),
            cells,
        });
    }

    let vendors = package
        .vendors
        .iter()
        .map(|v| MatrixVendor {
            id: v.id.clone(),
            name: v.name.clone(),
            base_bid: v.base_bid,
            status: v.status,
            recommended: v.recommended,
            rating: v.rating,
            budget_delta: v.base_bid - package.budget,
        })
        .collect();

    ComparisonMatrix {
        cost_code: package.cost_code.clone(),
        budget: package.budget,
        vendors,
        rows,
    }
}
