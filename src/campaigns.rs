//! Campaign table data and client-side query logic
//! (filter, sort, paginate).

use std::cmp::Ordering;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRow {
    pub id: u32,
    pub campaign: String,
    pub status: CampaignStatus,
    pub clicks: u64,
    pub conversions: u64,
    pub cost: u64,
    pub revenue: u64,
    pub roi: u64,
}

/// The fixed campaign data set backing the table.
pub fn seed_campaigns() -> Vec<CampaignRow> {
    fn row(
        id: u32,
        campaign: &str,
        status: CampaignStatus,
        clicks: u64,
        conversions: u64,
        cost: u64,
        revenue: u64,
        roi: u64,
    ) -> CampaignRow {
        CampaignRow {
            id,
            campaign: campaign.to_string(),
            status,
            clicks,
            conversions,
            cost,
            revenue,
            roi,
        }
    }

    vec![
        row(1, "Summer Sale 2024", CampaignStatus::Active, 15_420, 342, 8_500, 45_200, 432),
        row(2, "Black Friday Preview", CampaignStatus::Active, 23_150, 567, 12_300, 78_900, 541),
        row(3, "Product Launch Q3", CampaignStatus::Completed, 8_940, 189, 5_600, 23_400, 318),
        row(4, "Holiday Special", CampaignStatus::Paused, 11_200, 278, 7_200, 31_800, 342),
        row(5, "New Customer Acquisition", CampaignStatus::Active, 19_800, 445, 11_800, 58_700, 397),
        row(6, "Retargeting Campaign", CampaignStatus::Active, 7_650, 198, 4_200, 19_600, 367),
        row(7, "Brand Awareness", CampaignStatus::Completed, 28_900, 234, 15_600, 28_900, 85),
        row(8, "Mobile App Promotion", CampaignStatus::Active, 13_400, 356, 8_900, 42_300, 375),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Campaign,
    Status,
    Clicks,
    Conversions,
    Cost,
    Revenue,
    Roi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One table query: text search, status filter, sort, page.
#[derive(Debug, Clone)]
pub struct CampaignQuery {
    /// Case-insensitive substring match on the campaign name. Empty matches
    /// everything.
    pub search: String,
    /// `None` means all statuses.
    pub status: Option<CampaignStatus>,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    /// 1-based; clamped into the valid range.
    pub page: usize,
    pub page_size: usize,
}

impl Default for CampaignQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
            sort_field: SortField::Campaign,
            sort_direction: SortDirection::Asc,
            page: 1,
            page_size: 5,
        }
    }
}

/// One page of query results plus pagination context.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignPage {
    pub rows: Vec<CampaignRow>,
    pub total_rows: usize,
    pub total_pages: usize,
    pub page: usize,
}

impl CampaignQuery {
    pub fn apply(&self, data: &[CampaignRow]) -> CampaignPage {
        let needle = self.search.to_lowercase();
        let mut filtered: Vec<CampaignRow> = data
            .iter()
            .filter(|row| {
                let matches_search =
                    needle.is_empty() || row.campaign.to_lowercase().contains(&needle);
                let matches_status = self.status.map_or(true, |s| row.status == s);
                matches_search && matches_status
            })
            .cloned()
            .collect();

        filtered.sort_by(|a, b| {
            let ord = self.compare(a, b);
            match self.sort_direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        let page_size = self.page_size.max(1);
        let total_rows = filtered.len();
        let total_pages = (total_rows + page_size - 1) / page_size;
        let page = self.page.clamp(1, total_pages.max(1));
        let start = (page - 1) * page_size;
        let rows = filtered.into_iter().skip(start).take(page_size).collect();

        CampaignPage {
            rows,
            total_rows,
            total_pages,
            page,
        }
    }

    fn compare(&self, a: &CampaignRow, b: &CampaignRow) -> Ordering {
        match self.sort_field {
            SortField::Campaign => a.campaign.cmp(&b.campaign),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
            SortField::Clicks => a.clicks.cmp(&b.clicks),
            SortField::Conversions => a.conversions.cmp(&b.conversions),
            SortField::Cost => a.cost.cmp(&b.cost),
            SortField::Revenue => a.revenue.cmp(&b.revenue),
            SortField::Roi => a.roi.cmp(&b.roi),
        }
    }
}
