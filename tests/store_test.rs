//! File round-trip tests for candle and trade persistence.

use candlemill::{
    Candle, CandlemillError, Trade, read_candles, read_trades, write_candles, write_trades,
};

fn sample_candles() -> Vec<Candle> {
    vec![
        Candle {
            time: 1_700_000_040,
            period: 60,
            count: 2,
            volume: 2.0,
            vwap_price: 10.5,
            open_price: 10.0,
            high_price: 11.0,
            low_price: 10.0,
            close_price: 11.0,
        },
        Candle {
            time: 1_700_000_100,
            period: 60,
            count: 7,
            volume: 0.1,
            vwap_price: 1.0 / 3.0,
            open_price: 0.333_333,
            high_price: 0.4,
            low_price: 0.25,
            close_price: 0.375,
        },
        Candle {
            time: 1_700_000_160,
            period: 60,
            count: 1,
            volume: 123_456.789,
            vwap_price: 42_000.000_25,
            open_price: 41_999.5,
            high_price: 42_001.0,
            low_price: 41_998.0,
            close_price: 42_000.5,
        },
    ]
}

fn sample_trades() -> Vec<Trade> {
    vec![
        Trade { time: 0, amount: 1.0, price: 10.0 },
        Trade { time: 30, amount: 0.25, price: 11.5 },
        Trade { time: 61, amount: 2.0, price: 1.0 / 3.0 },
    ]
}

#[test]
fn candles_round_trip_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("candles.csv");

    let candles = sample_candles();
    write_candles(&path, &candles).unwrap();
    let loaded = read_candles(&path).unwrap();

    assert_eq!(loaded, candles);
}

#[test]
fn trades_round_trip_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trades.csv");

    let trades = sample_trades();
    write_trades(&path, &trades).unwrap();
    let loaded = read_trades(&path).unwrap();

    assert_eq!(loaded, trades);
}

#[test]
fn candle_file_starts_with_the_header_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("candles.csv");

    write_candles(&path, &sample_candles()).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let header = text.lines().next().unwrap();

    assert_eq!(
        header,
        "\"time\",\"period\",\"trades\",\"volume\",\"vwap_price\",\
         \"open_price\",\"high_price\",\"low_price\",\"close_price\""
    );
    assert_eq!(text.lines().count(), sample_candles().len() + 1);
}

#[test]
fn trade_file_has_no_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trades.csv");

    write_trades(&path, &sample_trades()).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();

    assert_eq!(text.lines().count(), sample_trades().len());
    assert!(text.starts_with("0,"));
}

#[test]
fn empty_sequences_round_trip() {
    let dir = tempfile::tempdir().unwrap();

    let candle_path = dir.path().join("candles.csv");
    write_candles(&candle_path, &[]).unwrap();
    assert!(read_candles(&candle_path).unwrap().is_empty());

    let trade_path = dir.path().join("trades.csv");
    write_trades(&trade_path, &[]).unwrap();
    assert!(read_trades(&trade_path).unwrap().is_empty());
}

#[test]
fn bad_candle_row_aborts_the_whole_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("candles.csv");

    std::fs::write(
        &path,
        "header line\n0,60,2,2.0,10.5,10.0,11.0,10.0,11.0\n60,60,not_a_number,2,9,9,9,9,9\n",
    )
    .unwrap();
    let err = read_candles(&path).unwrap_err();

    assert!(matches!(err, CandlemillError::InvalidCandleFields));
}

#[test]
fn short_candle_row_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("candles.csv");

    std::fs::write(&path, "header line\n0,60,2,2.0\n").unwrap();
    let err = read_candles(&path).unwrap_err();

    assert!(matches!(err, CandlemillError::InvalidCandleFields));
}

#[test]
fn extra_candle_column_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("candles.csv");

    std::fs::write(
        &path,
        "header line\n0,60,2,2.0,10.5,10.0,11.0,10.0,11.0,999\n",
    )
    .unwrap();
    let err = read_candles(&path).unwrap_err();

    assert!(matches!(err, CandlemillError::InvalidCandleFields));
}

#[test]
fn bad_trade_row_aborts_the_whole_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trades.csv");

    std::fs::write(&path, "0,10.0,1.0\nbroken\n").unwrap();
    let err = read_trades(&path).unwrap_err();

    assert!(matches!(err, CandlemillError::InvalidTradeFields));
}

#[test]
fn missing_file_surfaces_io_error() {
    let err = read_candles("/nonexistent/candlemill/candles.csv").unwrap_err();
    assert!(matches!(err, CandlemillError::Io(_)));

    let err = read_trades("/nonexistent/candlemill/trades.csv").unwrap_err();
    assert!(matches!(err, CandlemillError::Io(_)));
}

#[test]
fn crlf_line_endings_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trades.csv");

    std::fs::write(&path, "0,10.0,1.0\r\n30,11.5,0.25\r\n").unwrap();
    let trades = read_trades(&path).unwrap();

    assert_eq!(
        trades,
        vec![
            Trade { time: 0, amount: 1.0, price: 10.0 },
            Trade { time: 30, amount: 0.25, price: 11.5 },
        ]
    );
}

#[test]
fn trade_fields_are_ordered_time_price_amount_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trades.csv");

    write_trades(&path, &[Trade { time: 5, amount: 2.0, price: 7.5 }]).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();

    assert_eq!(text, "5,7.5,2\n");
}
