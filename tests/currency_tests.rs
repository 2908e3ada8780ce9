use piggybank_core::config::DashboardConfig;
use piggybank_core::currency::{default_formatter, CurrencyFormatter, GroupingStyle, LocaleConfig};
use rust_decimal::Decimal;

#[test]
fn formats_with_indian_grouping() {
    let text = default_formatter().format(Decimal::from(1234567), false);
    assert!(text.contains("12,34,567"), "unexpected: {text}");
    assert!(!text.starts_with('+'));
}

#[test]
fn plus_prefix_only_when_signed() {
    let fmt = default_formatter();
    assert_eq!(fmt.format(Decimal::from(1234567), true), "+₹12,34,567");
    assert_eq!(fmt.format(Decimal::from(1234567), false), "₹12,34,567");
}

#[test]
fn parse_reverses_format() {
    let fmt = default_formatter();
    for raw in [0_i64, 7, 999, 1000, 100000, 1234567, 987654321] {
        let value = Decimal::from(raw);
        assert_eq!(fmt.parse(&fmt.format(value, true)).unwrap(), value);
    }
}

#[test]
fn config_drives_formatter() {
    let config = DashboardConfig {
        currency_symbol: "$".into(),
        grouping: GroupingStyle::Western,
        ..DashboardConfig::default()
    };
    let fmt = config.formatter();
    assert_eq!(fmt.format(Decimal::new(123456789, 2), false), "$1,234,567.89");
}

#[test]
fn custom_separators() {
    let locale = LocaleConfig {
        decimal_separator: ',',
        grouping_separator: '.',
        grouping: GroupingStyle::Western,
    };
    let fmt = CurrencyFormatter::new("€", locale, 2);
    assert_eq!(fmt.format(Decimal::new(123450, 2), false), "€1.234,5");
    assert_eq!(fmt.parse("€1.234,5").unwrap(), Decimal::new(12345, 1));
}
