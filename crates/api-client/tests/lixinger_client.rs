use api_client::error::ApiError;
use api_client::{FundamentalsProvider, LixingerClient};
use chrono::NaiveDate;
use configuration::ApiConfig;
use core_types::StockCode;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> LixingerClient {
    let config = ApiConfig {
        base_url: server.uri(),
        ..ApiConfig::default()
    };
    LixingerClient::new(&config, "test-token").unwrap()
}

fn code() -> StockCode {
    "000651".parse().unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn fetches_valuation_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/a/stock/fundamental"))
        .and(body_partial_json(json!({
            "stockCodes": ["000651"],
            "date": "2018-03-01",
            "token": "test-token"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "msg": "success",
            "data": [{
                "date": "2018-03-01T00:00:00+08:00",
                "stockCode": "000651",
                "stockCnName": "格力电器",
                "pb": 3.2,
                "pb_pos10": 0.41,
                "pb_pos_all": 0.38,
                "pe_ttm": 11.5,
                "pe_ttm_pos10": 0.33,
                "pe_ttm_pos_all": 0.30,
                "d_pe_ttm": 12.1,
                "d_pe_ttm_pos10": 0.35,
                "d_pe_ttm_pos_all": 0.31
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = client_for(&server)
        .fetch_valuation(&code(), day(2018, 3, 1))
        .await
        .unwrap();

    assert_eq!(snapshot.date, Some(day(2018, 3, 1)));
    assert_eq!(snapshot.stock_name.as_deref(), Some("格力电器"));
    assert_eq!(snapshot.price_to_book, 3.2);
    assert_eq!(snapshot.price_to_book_percentile_10y, 0.41);
    assert_eq!(snapshot.price_to_earnings_ttm_percentile_10y, 0.33);
    assert_eq!(snapshot.deducted_pe_ttm, Some(12.1));
}

#[tokio::test]
async fn fetches_statements_sorted_by_date() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/a/stock/fs/industry"))
        .and(body_partial_json(json!({
            "startDate": "2014-01-01",
            "endDate": "2018-03-02",
            "metrics": [
                "q.profitStatement.bi.t",
                "q.balanceSheet.ar.t",
                "q.balanceSheet.s.t",
                "q.balanceSheet.tca_tcl_r.t"
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "msg": "success",
            "data": [
                {
                    "date": "2017-12-31T00:00:00+08:00",
                    "q": {
                        "profitStatement": { "bi": { "t": 150.0 } },
                        "balanceSheet": { "ar": { "t": 12.0 }, "s": { "t": 20.0 }, "tca_tcl_r": { "t": 1.2 } }
                    },
                    "industry": { "cnName": "家用电器" }
                },
                {
                    "date": "2016-12-31T00:00:00+08:00",
                    "q": {
                        "profitStatement": { "bi": { "t": 110.0 } },
                        "balanceSheet": { "ar": { "t": 10.0 }, "s": { "t": 18.0 }, "tca_tcl_r": { "t": 1.1 } }
                    },
                    "industry": { "cnName": "家用电器" }
                }
            ]
        })))
        .mount(&server)
        .await;

    let records = client_for(&server)
        .fetch_fundamentals(&code(), day(2014, 1, 1), day(2018, 3, 2))
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date, day(2016, 12, 31));
    assert_eq!(records[1].date, day(2017, 12, 31));
    assert_eq!(records[1].operating_revenue, 150.0);
    assert_eq!(records[0].industry_name, "家用电器");
}

#[tokio::test]
async fn empty_data_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/a/stock/fundamental"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "msg": "",
            "data": []
        })))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .fetch_valuation(&code(), day(2018, 3, 1))
        .await;
    assert!(matches!(result, Err(ApiError::EmptyData(_))));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .fetch_fundamentals(&code(), day(2014, 1, 1), day(2018, 3, 2))
        .await;
    match result {
        Err(ApiError::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream down");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_a_deserialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .fetch_valuation(&code(), day(2018, 3, 1))
        .await;
    assert!(matches!(result, Err(ApiError::Deserialization(_))));
}
