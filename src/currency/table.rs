//! Currency minor-unit table and monetary field set

/// Offset used for currencies missing from the table
pub const DEFAULT_MINOR_UNIT_OFFSET: u32 = 100;

/// Minor units per major unit, as the Ads API stores monetary values
const OFFSETS: &[(&str, u32)] = &[
    ("AED", 100),
    ("ARS", 100),
    ("AUD", 100),
    ("BDT", 100),
    ("BGN", 100),
    ("BHD", 100),
    ("BOB", 100),
    ("BRL", 100),
    ("CAD", 100),
    ("CHF", 100),
    ("CLP", 1),
    ("CNY", 100),
    ("COP", 1),
    ("CRC", 1),
    ("CZK", 100),
    ("DKK", 100),
    ("DZD", 100),
    ("EGP", 100),
    ("EUR", 100),
    ("FBZ", 100),
    ("GBP", 100),
    ("GTQ", 100),
    ("HKD", 100),
    ("HNL", 100),
    ("HRK", 100),
    ("HUF", 1),
    ("IDR", 1),
    ("ILS", 100),
    ("INR", 100),
    ("ISK", 1),
    ("JOD", 100),
    ("JPY", 1),
    ("KES", 100),
    ("KRW", 1),
    ("LTL", 100),
    ("LVL", 100),
    ("MOP", 100),
    ("MXN", 100),
    ("MYR", 100),
    ("NGN", 100),
    ("NIO", 100),
    ("NOK", 100),
    ("NZD", 100),
    ("PEN", 100),
    ("PHP", 100),
    ("PKR", 100),
    ("PLN", 100),
    ("PYG", 1),
    ("QAR", 100),
    ("RON", 100),
    ("RSD", 100),
    ("RUB", 100),
    ("SAR", 100),
    ("SEK", 100),
    ("SGD", 100),
    ("SKK", 100),
    ("THB", 100),
    ("TRY", 100),
    ("TWD", 1),
    ("UAH", 100),
    ("USD", 100),
    ("UYU", 100),
    ("VEF", 100),
    ("VES", 100),
    ("VND", 1),
    ("ZAR", 100),
];

/// Filter fields whose values are amounts of money in minor units
pub const MONETARY_FIELDS: &[&str] = &[
    "spent",
    "today_spent",
    "cost_per_purchase_fb",
    "cost_per_add_to_cart_fb",
    "cost_per_complete_registration_fb",
    "cost_per_view_content_fb",
    "cost_per_search_fb",
    "cost_per_initiate_checkout_fb",
    "cost_per_lead_fb",
    "cost_per_add_payment_info_fb",
    "cost_per_link_click",
    "cpc",
    "cpm",
];

/// A currency code with its minor-unit offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyDescriptor {
    pub code: &'static str,
    pub minor_unit_offset: u32,
}

/// Minor-unit offset for `code`, 100 when unlisted
pub fn minor_unit_offset(code: &str) -> u32 {
    OFFSETS
        .binary_search_by(|(c, _)| (*c).cmp(code))
        .map(|idx| OFFSETS[idx].1)
        .unwrap_or(DEFAULT_MINOR_UNIT_OFFSET)
}

/// Every listed currency
pub fn currencies() -> impl Iterator<Item = CurrencyDescriptor> {
    OFFSETS.iter().map(|&(code, minor_unit_offset)| CurrencyDescriptor {
        code,
        minor_unit_offset,
    })
}

/// Whether filters on `field` carry money
pub fn is_monetary_field(field: &str) -> bool {
    MONETARY_FIELDS.contains(&field)
}
