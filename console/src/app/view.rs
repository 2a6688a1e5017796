//! # Text Views
//!
//! Fixed-width tables for list pages and a settings sheet grouped by tab,
//! for terminal front ends that want something other than JSON.

use shared::utils::{format_amount, short_id, shorten};
use shared::{
    spec_for, AuditLog, DepositRequest, Document, KycSubmission, SettingGroup, SettingsBundle, Transaction,
    UserRecord, WithdrawalRequest, SCHEMA,
};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A list item shown as one table row
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl TableRow for UserRecord {
    const HEADERS: &'static [&'static str] = &["ID", "USERNAME", "NAME", "EMAIL", "KYC", "STATUS", "JOINED"];

    fn cells(&self) -> Vec<String> {
        vec![
            short_id(&self.id),
            self.username.clone(),
            self.display_name().to_string(),
            self.email.clone(),
            self.kyc_status.as_str().to_string(),
            if self.is_active { "active" } else { "inactive" }.to_string(),
            self.created_at.format(TIME_FORMAT).to_string(),
        ]
    }
}

impl TableRow for KycSubmission {
    const HEADERS: &'static [&'static str] = &["ID", "USER", "ID TYPE", "FILES", "STATUS", "SUBMITTED"];

    fn cells(&self) -> Vec<String> {
        vec![
            short_id(&self.id),
            short_id(&self.user_id),
            self.id_type.clone(),
            self.file_ids.len().to_string(),
            self.status.as_str().to_string(),
            self.created_at.format(TIME_FORMAT).to_string(),
        ]
    }
}

impl TableRow for Document {
    const HEADERS: &'static [&'static str] = &["ID", "TITLE", "CATEGORY", "PRICE", "SELLER", "STATUS", "CREATED"];

    fn cells(&self) -> Vec<String> {
        vec![
            short_id(&self.id),
            shorten(&self.title, 24, 6),
            self.category.clone(),
            format_amount(self.price),
            short_id(&self.seller_id),
            self.status.as_str().to_string(),
            self.created_at.format(TIME_FORMAT).to_string(),
        ]
    }
}

impl TableRow for DepositRequest {
    const HEADERS: &'static [&'static str] = &["ID", "USER", "AMOUNT", "METHOD", "STATUS", "REQUESTED"];

    fn cells(&self) -> Vec<String> {
        vec![
            short_id(&self.id),
            short_id(&self.user_id),
            format_amount(self.amount),
            self.payment_method.clone(),
            self.status.as_str().to_string(),
            self.created_at.format(TIME_FORMAT).to_string(),
        ]
    }
}

impl TableRow for WithdrawalRequest {
    const HEADERS: &'static [&'static str] = &["ID", "USER", "AMOUNT", "METHOD", "ADDRESS", "STATUS", "REQUESTED"];

    fn cells(&self) -> Vec<String> {
        vec![
            short_id(&self.id),
            short_id(&self.user_id),
            format_amount(self.amount),
            self.withdrawal_method.clone(),
            short_id(&self.withdrawal_address),
            self.status.as_str().to_string(),
            self.created_at.format(TIME_FORMAT).to_string(),
        ]
    }
}

impl TableRow for Transaction {
    const HEADERS: &'static [&'static str] = &["ID", "USER", "TYPE", "AMOUNT", "STATUS", "DATE"];

    fn cells(&self) -> Vec<String> {
        vec![
            short_id(&self.id),
            short_id(&self.user_id),
            self.kind.clone(),
            format_amount(self.amount),
            self.status.clone(),
            self.created_at.format(TIME_FORMAT).to_string(),
        ]
    }
}

impl TableRow for AuditLog {
    const HEADERS: &'static [&'static str] = &["TIME", "ACTION", "USER", "IP"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.timestamp.format(TIME_FORMAT).to_string(),
            self.action.clone(),
            self.user_id.as_deref().map(short_id).unwrap_or_else(|| "-".to_string()),
            self.ip_address.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }
}

/// Header, rule and one line per item, columns padded to the widest cell
pub fn render_table<T: TableRow>(items: &[T]) -> String {
    let rows: Vec<Vec<String>> = items.iter().map(T::cells).collect();

    let mut widths: Vec<usize> = T::HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let headers: Vec<String> = T::HEADERS.iter().map(|h| h.to_string()).collect();
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut out = String::new();
    for line in std::iter::once(&headers).chain(std::iter::once(&rule)).chain(&rows) {
        out.push_str(&pad_line(line, &widths));
        out.push('\n');
    }
    if rows.is_empty() {
        out.push_str("(no records)\n");
    }
    out
}

fn pad_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    padded.join("  ").trim_end().to_string()
}

/// Settings under one heading per tab, labelled as in the web console.
///
/// Keys outside the schema are listed last under `Other`.
pub fn render_settings(bundle: &SettingsBundle) -> String {
    let mut sections: Vec<(&str, Vec<(String, String)>)> = SettingGroup::all()
        .iter()
        .map(|group| {
            let rows = SCHEMA
                .iter()
                .filter(|spec| spec.group == *group)
                .filter_map(|spec| bundle.get(spec.key).map(|v| (spec.label.to_string(), v.to_string())))
                .collect();
            (group.title(), rows)
        })
        .collect();

    let unknown = bundle
        .iter()
        .filter(|(key, _)| spec_for(key).is_none())
        .map(|(key, value)| (key.clone(), value.to_string()))
        .collect();
    sections.push(("Other", unknown));

    let width = sections
        .iter()
        .flat_map(|(_, rows)| rows.iter().map(|(label, _)| label.chars().count()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (title, rows) in sections.iter().filter(|(_, rows)| !rows.is_empty()) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("[{}]\n", title));
        for (label, value) in rows {
            out.push_str(&format!("  {:<width$}  {}\n", label, value, width = width));
        }
    }
    out
}
