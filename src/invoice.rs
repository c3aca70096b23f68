//! Single-member invoice page.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{Error, LayoutError};
use crate::format::{amount_en_in, date_en_gb, invoice_number, padded_account};
use crate::ledger::{DerivedFields, MemberLedger};
use crate::model::{
    Alignment, BLACK, CellStyle, Color, ColumnStyle, FontStyle, Margins, Paint, TableSpec,
    TextStyle, WHITE,
};
use crate::pdf::{Document, wave_band};

const NAVY: Color = [30, 58, 102];
const GOLD: Color = [255, 193, 7];
const LABEL_GREY: Color = [80, 80, 80];
const BODY_GREY: Color = [50, 50, 50];
const STRIPE: Color = [250, 250, 250];
const FOOTER_GREY: Color = [100, 100, 100];
const BORDER_GREY: Color = [200, 200, 200];

const HEADER_HEIGHT: f32 = 45.0;
const WAVE_HEIGHT: f32 = 12.0;
const LEFT_X: f32 = 15.0;
/// Distance of right-aligned text from the right page edge.
const RIGHT_INSET: f32 = 15.0;
/// Metadata labels start this far from the right edge.
const META_LABEL_INSET: f32 = 65.0;
const TABLE_START_Y: f32 = 135.0;
const SUMMARY_X: f32 = 120.0;

/// Company artwork and fixed copy printed on every invoice.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Branding {
    pub company_name: String,
    pub tagline: String,
    pub phone: String,
    pub website: String,
    pub email: String,
    /// Member addresses print as `member{account}@{domain}`.
    pub member_email_domain: String,
    pub payment_lines: Vec<String>,
    pub thank_you: String,
    pub footer_lines: Vec<String>,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            company_name: "MONEY TREE".into(),
            tagline: "FUND MANAGEMENT SYSTEM".into(),
            phone: "+91 8973576694".into(),
            website: "www.sangathi.in".into(),
            email: "info@sangathi.in".into(),
            member_email_domain: "sangathi.in".into(),
            payment_lines: vec![
                "Account: 1234567890".into(),
                "IFSC: MONY0001234".into(),
                "Bank: Money Tree Bank Ltd.".into(),
            ],
            thank_you: "THANK YOU FOR FUNDING WITH US".into(),
            footer_lines: vec![
                "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Vestibulum id ligula porta felis euismod semper.".into(),
                "Cras mattis consectetur purus sit amet fermentum. Sed posuere consectetur est at lobortis.".into(),
            ],
        }
    }
}

impl Branding {
    /// Load branding from a JSON file; absent keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let bytes = std::fs::read(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }
}

/// Everything an invoice prints that does not come from the ledger.
#[derive(Clone, Debug, PartialEq)]
pub struct InvoiceContext {
    pub issued_on: NaiveDate,
    pub branding: Branding,
}

impl InvoiceContext {
    pub fn new(issued_on: NaiveDate) -> Self {
        Self {
            issued_on,
            branding: Branding::default(),
        }
    }

    pub fn with_branding(mut self, branding: Branding) -> Self {
        self.branding = branding;
        self
    }
}

/// Stand-in contact number for the bill-to block. Derived from the account
/// number so repeated renders print the same digits; always ten digits with a
/// non-zero lead.
pub fn placeholder_phone(account_number: u64) -> String {
    // splitmix64 finaliser
    let mut z = account_number.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    format!("+91 {}", 1_000_000_000 + z % 9_000_000_000)
}

fn style(font_size: f32, font_style: FontStyle, color: Color) -> TextStyle {
    TextStyle::new(font_size, font_style, color)
}

fn line_items(ledger: &MemberLedger, derived: &DerivedFields) -> Vec<Vec<String>> {
    [
        ("Principal Amount", ledger.principal),
        ("Loan Amount Outstanding", ledger.loan_taken),
        ("Monthly Due Payment", ledger.monthly_due),
        ("Interest (3% per month)", derived.interest_amount),
        ("Amount Paid in Loan", ledger.amount_paid_in_loan),
        ("Interest Applied to Loan", ledger.interest_to_loan),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (description, value))| {
        let amount = amount_en_in(value);
        vec![
            format!("{:02}", i + 1),
            description.to_string(),
            amount.clone(),
            "1".to_string(),
            amount,
        ]
    })
    .collect()
}

fn line_item_table(ledger: &MemberLedger, derived: &DerivedFields) -> TableSpec {
    TableSpec {
        start_y: TABLE_START_Y,
        head: ["NO.", "ITEM DESCRIPTION", "PRICE", "QTY", "TOTAL"]
            .into_iter()
            .map(String::from)
            .collect(),
        body: line_items(ledger, derived),
        columns: vec![
            ColumnStyle::new(18.0, Alignment::Center),
            ColumnStyle::new(70.0, Alignment::Left),
            ColumnStyle::new(35.0, Alignment::Right),
            ColumnStyle::new(18.0, Alignment::Center),
            ColumnStyle::new(38.0, Alignment::Right),
        ],
        head_style: CellStyle {
            font_size: 10.0,
            font_style: FontStyle::Bold,
            text_color: WHITE,
            fill: Some(GOLD),
            padding: 4.0,
            align: Some(Alignment::Center),
        },
        body_style: CellStyle {
            font_size: 9.0,
            font_style: FontStyle::Normal,
            text_color: BODY_GREY,
            fill: None,
            padding: 3.0,
            align: None,
        },
        alternate_fill: Some(STRIPE),
        margin: Margins {
            top: LEFT_X,
            right: RIGHT_INSET,
            bottom: LEFT_X,
            left: LEFT_X,
        },
        min_row_height: 0.0,
        spacing_after: 12.0,
    }
}

fn draw_header(doc: &mut Document, branding: &Branding, page_width: f32) {
    doc.fill_rect(0.0, 0.0, page_width, HEADER_HEIGHT, NAVY);

    // logo placeholder
    doc.rounded_rect(
        15.0,
        12.0,
        15.0,
        15.0,
        0.0,
        Paint::FillStroke {
            fill: WHITE,
            stroke: NAVY,
            line_width: 2.0,
        },
    );

    doc.text(&branding.company_name, 35.0, 20.0, style(18.0, FontStyle::Bold, WHITE));
    doc.text(&branding.tagline, 35.0, 26.0, style(9.0, FontStyle::Normal, WHITE));

    let right_x = page_width - RIGHT_INSET;
    let contact = style(8.0, FontStyle::Normal, WHITE).aligned(Alignment::Right);
    for (line, y) in [&branding.phone, &branding.website, &branding.email]
        .into_iter()
        .zip([15.0, 21.0, 27.0])
    {
        doc.text(line, right_x, y, contact);
    }
}

fn draw_bill_to(doc: &mut Document, ledger: &MemberLedger, branding: &Branding) {
    doc.text("INVOICE TO:", LEFT_X, 92.0, style(9.0, FontStyle::Bold, LABEL_GREY));
    doc.text(&ledger.name, LEFT_X, 102.0, style(12.0, FontStyle::Bold, BLACK));

    let detail = style(9.0, FontStyle::Normal, LABEL_GREY);
    let account = padded_account(ledger.account_number);
    doc.text(format!("Account: {account}"), LEFT_X, 109.0, detail);
    doc.text(
        format!("Phone: {}", placeholder_phone(ledger.account_number)),
        LEFT_X,
        115.0,
        detail,
    );
    doc.text(
        format!(
            "Email: member{}@{}",
            ledger.account_number, branding.member_email_domain
        ),
        LEFT_X,
        121.0,
        detail,
    );
}

fn draw_metadata(doc: &mut Document, ledger: &MemberLedger, issued_on: NaiveDate, page_width: f32) {
    let label_x = page_width - META_LABEL_INSET;
    let value_x = page_width - RIGHT_INSET;
    let label = style(9.0, FontStyle::Bold, LABEL_GREY);
    let value = style(9.0, FontStyle::Normal, BLACK).aligned(Alignment::Right);

    let rows = [
        ("Invoice #:", invoice_number(issued_on, ledger.account_number), 92.0),
        ("Account:", padded_account(ledger.account_number), 102.0),
        ("Date:", date_en_gb(issued_on), 112.0),
    ];
    for (name, text, y) in rows {
        doc.text(name, label_x, y, label);
        doc.text(text, value_x, y, value);
    }
}

fn draw_payment_info(doc: &mut Document, branding: &Branding, final_y: f32) {
    doc.text("Payment Info:", LEFT_X, final_y, style(10.0, FontStyle::Bold, BLACK));
    let detail = style(9.0, FontStyle::Normal, LABEL_GREY);
    for (i, line) in branding.payment_lines.iter().enumerate() {
        doc.text(line, LEFT_X, final_y + 7.0 + 6.0 * i as f32, detail);
    }
}

fn draw_summary(doc: &mut Document, derived: &DerivedFields, final_y: f32, page_width: f32) {
    let value_x = page_width - RIGHT_INSET;
    let subtotal = amount_en_in(derived.computed_total_due);

    let label = style(10.0, FontStyle::Normal, LABEL_GREY);
    let value = style(10.0, FontStyle::Bold, LABEL_GREY).aligned(Alignment::Right);
    doc.text("SUB TOTAL:", SUMMARY_X, final_y + 2.0, label);
    doc.text("TAX:", SUMMARY_X, final_y + 12.0, label);
    doc.text(subtotal.clone(), value_x, final_y + 2.0, value);
    doc.text("0.00%", value_x, final_y + 12.0, value);

    doc.rounded_rect(
        SUMMARY_X - 3.0,
        final_y + 18.0,
        page_width - SUMMARY_X - 12.0,
        12.0,
        2.0,
        Paint::Fill(GOLD),
    );
    doc.text("TOTAL:", SUMMARY_X + 2.0, final_y + 26.0, style(12.0, FontStyle::Bold, WHITE));
    doc.text(
        subtotal,
        value_x,
        final_y + 26.0,
        style(13.0, FontStyle::Bold, WHITE).aligned(Alignment::Right),
    );
}

fn draw_closing(doc: &mut Document, branding: &Branding, final_y: f32) {
    doc.rounded_rect(LEFT_X, final_y + 38.0, 140.0, 12.0, 2.0, Paint::Fill(GOLD));
    doc.text(
        &branding.thank_you,
        20.0,
        final_y + 46.0,
        style(11.0, FontStyle::Bold, WHITE),
    );

    let note = style(7.0, FontStyle::Italic, FOOTER_GREY);
    for (i, line) in branding.footer_lines.iter().enumerate() {
        doc.text(line, LEFT_X, final_y + 58.0 + 5.0 * i as f32, note);
    }
}

/// Draw one invoice for `ledger` on the document's current page.
///
/// Blocks are drawn top to bottom; everything after the line-item table is
/// positioned from the table's `final_y`, so a table that spills onto a new
/// page carries the summary with it.
pub fn render_invoice(
    doc: &mut Document,
    ledger: &MemberLedger,
    ctx: &InvoiceContext,
) -> Result<(), LayoutError> {
    let derived = ledger.derive();
    log::debug!(
        "invoice account={} due={} ({}) balance={}",
        ledger.account_number,
        derived.computed_total_due,
        derived.due_severity.as_str(),
        derived.balance_severity.as_str(),
    );

    let size = doc.page_size();
    let page_width = size.width;
    let branding = &ctx.branding;

    draw_header(doc, branding, page_width);
    doc.path(
        wave_band(page_width, HEADER_HEIGHT, WAVE_HEIGHT),
        Paint::Fill(GOLD),
    );
    doc.text(
        "INVOICE",
        page_width / 2.0,
        75.0,
        style(36.0, FontStyle::Bold, GOLD).aligned(Alignment::Center),
    );
    draw_bill_to(doc, ledger, branding);
    draw_metadata(doc, ledger, ctx.issued_on, page_width);

    let final_y = doc.table(&line_item_table(ledger, &derived))?;

    draw_payment_info(doc, branding, final_y);
    draw_summary(doc, &derived, final_y, page_width);
    draw_closing(doc, branding, final_y);

    doc.stroke_rect(
        8.0,
        8.0,
        page_width - 16.0,
        size.height - 16.0,
        BORDER_GREY,
        0.5,
    );
    Ok(())
}
