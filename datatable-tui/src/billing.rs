//! Billing groups page: row type, mock data set and column definitions.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use datatable_lib::prelude::*;

/// One billing group as listed by the inventories API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingGroup {
    pub billing_group_id: i64,
    pub billing_group_name: String,
    /// `YYYY-MM-DD HH:MM:SS`, UTC.
    pub date_created: String,
    pub company_id: i64,
    pub company_name: String,
    pub inventory_id: i64,
}

impl BillingGroup {
    fn new(
        billing_group_id: i64,
        billing_group_name: &str,
        date_created: &str,
        company_id: i64,
        company_name: &str,
        inventory_id: i64,
    ) -> Self {
        Self {
            billing_group_id,
            billing_group_name: billing_group_name.to_string(),
            date_created: date_created.to_string(),
            company_id,
            company_name: company_name.to_string(),
            inventory_id,
        }
    }
}

const COMPANIES: [(i64, &str); 8] = [
    (1047488256, "qa_ppo_test_1733910713"),
    (1047488255, "qa_ppo_test_1764157980"),
    (1047488253, "Telna"),
    (1047488251, "Telna"),
    (1047488250, "Telna"),
    (1, "Telna"),
    (1047488220, "Divyanshu_L2"),
    (1047485609, "qa_ppo_test_1727675623"),
];

/// Number of generated rows after the hand-written ones.
const GENERATED_ROWS: i64 = 691;

/// 701 billing groups, newest first.
pub fn mock_data() -> Vec<BillingGroup> {
    #[rustfmt::skip]
    let mut groups = vec![
        BillingGroup::new(1097715, "qa_ppo_test_1733910713", "2025-11-26 11:53:27", 1047488256, "qa_ppo_test_1733910713", 54310),
        BillingGroup::new(1097712, "qa_ppo_test_1764157980", "2025-11-26 11:53:02", 1047488255, "qa_ppo_test_1764157980", 54309),
        BillingGroup::new(1097713, "Telna", "2025-11-26 05:36:42", 1047488253, "Telna", 54306),
        BillingGroup::new(1097679, "Telna", "2025-11-24 07:18:30", 1047488251, "Telna", 54304),
        BillingGroup::new(1097676, "Telna", "2025-11-24 07:15:39", 1047488250, "Telna", 54303),
        BillingGroup::new(1097677, "Demo_rename", "2025-11-20 12:42:22", 1, "Telna", 1),
        BillingGroup::new(1097684, "BG_Divyanshu_L2", "2025-11-20 07:26:32", 1047488220, "Divyanshu_L2", 54282),
        BillingGroup::new(1097683, "Custom Test Group", "2025-11-11 13:27:40", 1, "Telna", 1),
        BillingGroup::new(1097517, "qa_ppo_test_1727675623", "2025-11-10 15:04:07", 1047485609, "qa_ppo_test_1727675623", 53355),
        BillingGroup::new(1097515, "AutoGrp_L1_Auth_1761818975_E...", "2025-10-30 10:09:36", 1, "Telna", 1),
    ];

    groups.extend((0..GENERATED_ROWS).map(|i| {
        let (company_id, company_name) = COMPANIES[i as usize % COMPANIES.len()];
        let id = 1097514 - i;
        BillingGroup {
            billing_group_id: id,
            billing_group_name: format!("BillingGroup_{}", id),
            date_created: format!(
                "2025-10-{:02} {:02}:{:02}:{:02}",
                29 - i % 28,
                8 + i % 12,
                i % 60,
                i % 60
            ),
            company_id,
            company_name: company_name.to_string(),
            inventory_id: 53354 - i,
        }
    }));

    groups
}

fn link(value: &CellValue) -> CellContent {
    Span::new(value.to_string()).tone(Tone::Accent).into()
}

/// Date in the default tone followed by the time, muted.
fn date_cell(date_created: &str) -> CellContent {
    match date_created.split_once(' ') {
        Some((date, time)) => CellContent::from_spans([
            Span::new(date),
            Span::new(" "),
            Span::new(time).muted(),
        ]),
        None => CellContent::plain(date_created),
    }
}

pub fn columns() -> Vec<Column<BillingGroup>> {
    vec![
        Column::new("billingGroupId", "Billing Group ID", |g: &BillingGroup| {
            g.billing_group_id.into()
        })
        .render(|_, value| {
            Span::new(value.to_string())
                .tone(Tone::Accent)
                .bold()
                .into()
        })
        .width(18),
        Column::new("billingGroupName", "Billing Group Name", |g: &BillingGroup| {
            g.billing_group_name.as_str().into()
        })
        .render(|_, value| link(value))
        .min_width(20)
        .max_width(32),
        Column::new("dateCreated", "Date Created (UTC)", |g: &BillingGroup| {
            g.date_created.as_str().into()
        })
        .tooltip("Date and time in UTC timezone")
        .render(|g, _| date_cell(&g.date_created))
        .width(22),
        Column::new("companyId", "Company ID", |g: &BillingGroup| g.company_id.into())
            .render(|_, value| link(value))
            .width(12),
        Column::new("companyName", "Company Name", |g: &BillingGroup| {
            g.company_name.as_str().into()
        })
        .render(|_, value| link(value))
        .min_width(16)
        .max_width(28),
        Column::new("inventoryId", "Inventory ID", |g: &BillingGroup| g.inventory_id.into())
            .render(|_, value| link(value))
            .width(14),
        Column::new("actions", "Actions", |_: &BillingGroup| CellValue::Null)
            .not_sortable()
            .align(Alignment::Center)
            .width(8),
    ]
}

/// Table settings of the page.
pub fn table_config() -> TableConfig {
    TableConfig::new()
        .default_page_size(10)
        .default_sort("dateCreated", true)
        .empty_message("No billing groups found.")
        .test_id_prefix("billing-groups-table")
}

/// Shared company-name filter, read by the source on every fetch.
pub type CompanyFilter = Arc<RwLock<String>>;

/// Mock source over [`mock_data`], sortable by every sortable column.
pub fn source(latency: Duration, filter: CompanyFilter) -> MemorySource<BillingGroup> {
    let columns = ColumnSet::new(columns());
    let source = MemorySource::new(mock_data())
        .latency(latency)
        .filter(move |g: &BillingGroup| {
            let needle = filter
                .read()
                .map(|f| f.trim().to_lowercase())
                .unwrap_or_default();
            needle.is_empty() || g.company_name.to_lowercase().contains(&needle)
        });
    match columns {
        Ok(columns) => source.sort_by_columns(&columns),
        Err(e) => {
            log::warn!("Billing columns are invalid, sorting disabled: {}", e);
            source
        }
    }
}
