//! CurrencyService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use currency_types::{
        AppError, ConvertCurrencyRequest, CreateCurrencyRequest, Currency, CurrencyId,
        CurrencyRepository, NewCurrency, Quote, QuoteError, QuoteProvider, QuoteResponse,
        RepoError,
    };

    use crate::CurrencyService;

    /// Simple in-memory store for testing the service layer.
    pub struct MockRepo {
        currencies: Mutex<Vec<Currency>>,
        next_id: Mutex<i64>,
        lookups: AtomicUsize,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                currencies: Mutex::new(Vec::new()),
                next_id: Mutex::new(1),
                lookups: AtomicUsize::new(0),
            }
        }

        pub fn with_currency(self, name: &str, exchanges: &[(&str, Decimal)]) -> Self {
            let exchanges = exchanges
                .iter()
                .map(|(target, rate)| (target.to_string(), *rate))
                .collect();
            let new = NewCurrency::new(name.to_string(), name.to_string(), exchanges).unwrap();
            let mut next_id = self.next_id.lock().unwrap();
            self.currencies
                .lock()
                .unwrap()
                .push(Currency::from_parts(CurrencyId::new(*next_id), new));
            *next_id += 1;
            drop(next_id);
            self
        }

        fn len(&self) -> usize {
            self.currencies.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CurrencyRepository for MockRepo {
        async fn find_by_name(&self, name: &str) -> Result<Option<Currency>, RepoError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .currencies
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.name == name)
                .cloned())
        }

        async fn find_all(&self) -> Result<Vec<Currency>, RepoError> {
            Ok(self.currencies.lock().unwrap().clone())
        }

        async fn save(&self, currency: NewCurrency) -> Result<Currency, RepoError> {
            let mut currencies = self.currencies.lock().unwrap();
            if currencies.iter().any(|c| c.name == currency.name) {
                return Err(RepoError::Conflict(currency.name));
            }
            let mut next_id = self.next_id.lock().unwrap();
            let saved = Currency::from_parts(CurrencyId::new(*next_id), currency);
            *next_id += 1;
            currencies.push(saved.clone());
            Ok(saved)
        }

        async fn delete_by_id(&self, id: CurrencyId) -> Result<(), RepoError> {
            self.currencies.lock().unwrap().retain(|c| c.id != id);
            Ok(())
        }
    }

    /// Store whose lookup always misses but whose save always conflicts,
    /// as when a concurrent create wins the race.
    struct RacingRepo;

    #[async_trait]
    impl CurrencyRepository for RacingRepo {
        async fn find_by_name(&self, _name: &str) -> Result<Option<Currency>, RepoError> {
            Ok(None)
        }

        async fn find_all(&self) -> Result<Vec<Currency>, RepoError> {
            Ok(Vec::new())
        }

        async fn save(&self, currency: NewCurrency) -> Result<Currency, RepoError> {
            Err(RepoError::Conflict(currency.name))
        }

        async fn delete_by_id(&self, _id: CurrencyId) -> Result<(), RepoError> {
            Err(RepoError::Database("connection reset".into()))
        }
    }

    /// Quote provider returning a canned outcome and recording requested pairs.
    pub struct MockQuotes {
        outcome: Result<QuoteResponse, ()>,
        requested: Mutex<Vec<String>>,
    }

    impl MockQuotes {
        pub fn returning(entries: &[(&str, &str)]) -> Self {
            let response = entries
                .iter()
                .map(|(key, high)| (key.to_string(), Quote::with_high(*high)))
                .collect();
            Self {
                outcome: Ok(response),
                requested: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                outcome: Err(()),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl QuoteProvider for MockQuotes {
        async fn get_quote(&self, pair: &str) -> Result<QuoteResponse, QuoteError> {
            self.requested.lock().unwrap().push(pair.to_string());
            match &self.outcome {
                Ok(response) => Ok(response.clone()),
                Err(()) => Err(QuoteError::Status(503)),
            }
        }
    }

    fn convert_req(from: &str, to: &str, amount: Decimal) -> ConvertCurrencyRequest {
        ConvertCurrencyRequest {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        }
    }

    fn create_req(name: &str) -> CreateCurrencyRequest {
        CreateCurrencyRequest {
            name: name.to_string(),
            description: format!("{} description", name),
            exchanges: BTreeMap::from([("USD".to_string(), dec!(0.2))]),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Catalog
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_list_labels() {
        let service = CurrencyService::new(
            MockRepo::new()
                .with_currency("EUR", &[])
                .with_currency("USD", &[]),
            MockQuotes::failing(),
        );

        let labels = service.list().await.unwrap();

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].label, "1 - EUR");
        assert_eq!(labels[1].label, "2 - USD");
    }

    #[tokio::test]
    async fn test_list_empty() {
        let service = CurrencyService::new(MockRepo::new(), MockQuotes::failing());

        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_returns_id() {
        let service = CurrencyService::new(MockRepo::new(), MockQuotes::failing());

        let id = service.create(create_req("BRL")).await.unwrap();

        assert_eq!(id, CurrencyId::new(1));
        assert_eq!(service.repo().len(), 1);
        let labels = service.list().await.unwrap();
        assert_eq!(labels[0].label, format!("{} - BRL", id));
    }

    #[tokio::test]
    async fn test_create_duplicate_fails() {
        let service = CurrencyService::new(MockRepo::new(), MockQuotes::failing());
        service.create(create_req("USD")).await.unwrap();

        let result = service.create(create_req("USD")).await;

        assert!(matches!(result, Err(AppError::DuplicateCurrency(name)) if name == "USD"));
        assert_eq!(service.repo().len(), 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_race_fails() {
        let service = CurrencyService::new(RacingRepo, MockQuotes::failing());

        let result = service.create(create_req("USD")).await;

        assert!(matches!(result, Err(AppError::DuplicateCurrency(_))));
    }

    #[tokio::test]
    async fn test_create_empty_name_fails() {
        let service = CurrencyService::new(MockRepo::new(), MockQuotes::failing());

        let result = service.create(create_req("   ")).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(service.repo().len(), 0);
    }

    #[tokio::test]
    async fn test_create_negative_rate_fails() {
        let service = CurrencyService::new(MockRepo::new(), MockQuotes::failing());
        let mut req = create_req("BRL");
        req.exchanges.insert("EUR".to_string(), dec!(-0.18));

        let result = service.create(req).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let service = CurrencyService::new(
            MockRepo::new().with_currency("BRL", &[]),
            MockQuotes::failing(),
        );

        assert!(service.delete(CurrencyId::new(1)).await.is_ok());
        assert!(service.delete(CurrencyId::new(1)).await.is_ok());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_store_failure_is_internal() {
        let service = CurrencyService::new(RacingRepo, MockQuotes::failing());

        let result = service.delete(CurrencyId::new(1)).await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Local conversion
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_convert() {
        let service = CurrencyService::new(
            MockRepo::new().with_currency("BRL", &[("USD", dec!(10))]),
            MockQuotes::failing(),
        );

        let response = service.convert(convert_req("BRL", "USD", dec!(5))).await.unwrap();

        assert_eq!(response.amount, dec!(50));
    }

    #[tokio::test]
    async fn test_convert_keeps_decimal_precision() {
        let service = CurrencyService::new(
            MockRepo::new().with_currency("BRL", &[("USD", dec!(0.1))]),
            MockQuotes::failing(),
        );

        let response = service
            .convert(convert_req("BRL", "USD", dec!(0.2)))
            .await
            .unwrap();

        assert_eq!(response.amount, dec!(0.02));
        assert_eq!(response.amount.to_string(), "0.02");
    }

    #[tokio::test]
    async fn test_convert_rejects_product_beyond_decimal_precision() {
        let service = CurrencyService::new(
            MockRepo::new().with_currency("BRL", &[("USD", dec!(0.000000000000001))]),
            MockQuotes::returning(&[("BRLUSD", "0.000000000000001")]),
        );
        let req = convert_req("BRL", "USD", dec!(0.00000000000001));

        let local = service.convert(req.clone()).await;
        let live = service.convert_with_quotes(req).await;

        assert!(matches!(local, Err(AppError::BadRequest(_))));
        assert!(matches!(live, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_convert_ignores_trailing_zeros_in_scale() {
        let service = CurrencyService::new(
            MockRepo::new().with_currency("BRL", &[("USD", dec!(2.000000000))]),
            MockQuotes::failing(),
        );

        let response = service
            .convert(convert_req("BRL", "USD", dec!(1.00000000000000000000)))
            .await
            .unwrap();

        assert_eq!(response.amount, dec!(2));
    }

    #[tokio::test]
    async fn test_convert_rejects_product_too_large() {
        let service = CurrencyService::new(
            MockRepo::new().with_currency("BRL", &[("USD", dec!(10))]),
            MockQuotes::failing(),
        );

        let result = service
            .convert(convert_req("BRL", "USD", Decimal::MAX))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_convert_currency_not_found() {
        let service = CurrencyService::new(MockRepo::new(), MockQuotes::failing());

        let result = service.convert(convert_req("BRL", "USD", dec!(5))).await;

        assert!(matches!(result, Err(AppError::CurrencyNotFound(name)) if name == "BRL"));
    }

    #[tokio::test]
    async fn test_convert_exchange_not_found() {
        let service = CurrencyService::new(
            MockRepo::new().with_currency("BRL", &[("USD", dec!(10))]),
            MockQuotes::failing(),
        );

        let result = service.convert(convert_req("BRL", "EUR", dec!(5))).await;

        match result {
            Err(AppError::ExchangeRateNotFound { from, to }) => {
                assert_eq!(from, "BRL");
                assert_eq!(to, "EUR");
            }
            other => panic!("expected ExchangeRateNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_convert_does_not_use_quotes() {
        let service = CurrencyService::new(
            MockRepo::new().with_currency("BRL", &[("USD", dec!(10))]),
            MockQuotes::returning(&[("BRLUSD", "99")]),
        );

        service.convert(convert_req("BRL", "USD", dec!(1))).await.unwrap();

        assert!(service.quotes().requested().is_empty());
    }

    #[tokio::test]
    async fn test_convert_non_positive_amount_fails_before_lookup() {
        let service = CurrencyService::new(
            MockRepo::new().with_currency("BRL", &[("USD", dec!(10))]),
            MockQuotes::failing(),
        );

        let zero = service.convert(convert_req("BRL", "USD", Decimal::ZERO)).await;
        let negative = service.convert(convert_req("BRL", "USD", dec!(-5))).await;

        assert!(matches!(zero, Err(AppError::BadRequest(_))));
        assert!(matches!(negative, Err(AppError::BadRequest(_))));
        assert_eq!(service.repo().lookups.load(Ordering::SeqCst), 0);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Live-quote conversion
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_convert_with_quotes() {
        let service = CurrencyService::new(
            MockRepo::new(),
            MockQuotes::returning(&[("USDBRL", "5.50")]),
        );

        let response = service
            .convert_with_quotes(convert_req("USD", "BRL", dec!(10)))
            .await
            .unwrap();

        assert_eq!(response.amount, dec!(55.00));
        assert_eq!(response.amount.to_string(), "55.00");
        assert_eq!(service.quotes().requested(), vec!["USD-BRL"]);
    }

    #[tokio::test]
    async fn test_convert_with_quotes_upper_cases_pair() {
        let service = CurrencyService::new(
            MockRepo::new(),
            MockQuotes::returning(&[("USDBRL", "5")]),
        );

        let response = service
            .convert_with_quotes(convert_req("usd", "brl", dec!(2)))
            .await
            .unwrap();

        assert_eq!(response.amount, dec!(10));
        assert_eq!(service.quotes().requested(), vec!["USD-BRL"]);
    }

    #[tokio::test]
    async fn test_convert_with_quotes_missing_pair() {
        let service = CurrencyService::new(
            MockRepo::new(),
            MockQuotes::returning(&[("EURBRL", "6.00")]),
        );

        let result = service
            .convert_with_quotes(convert_req("USD", "BRL", dec!(10)))
            .await;

        assert!(matches!(result, Err(AppError::QuoteUnavailable)));
    }

    #[tokio::test]
    async fn test_convert_with_quotes_provider_failure() {
        let service = CurrencyService::new(MockRepo::new(), MockQuotes::failing());

        let result = service
            .convert_with_quotes(convert_req("USD", "BRL", dec!(10)))
            .await;

        assert!(matches!(result, Err(AppError::QuoteUnavailable)));
    }

    #[tokio::test]
    async fn test_convert_with_quotes_invalid_price() {
        let service = CurrencyService::new(
            MockRepo::new(),
            MockQuotes::returning(&[("USDBRL", "n/a")]),
        );

        let result = service
            .convert_with_quotes(convert_req("USD", "BRL", dec!(10)))
            .await;

        assert!(matches!(result, Err(AppError::QuoteUnavailable)));
    }

    #[tokio::test]
    async fn test_convert_with_quotes_ignores_store() {
        let service = CurrencyService::new(
            MockRepo::new().with_currency("USD", &[("BRL", dec!(1))]),
            MockQuotes::returning(&[("USDBRL", "5.50")]),
        );

        let response = service
            .convert_with_quotes(convert_req("USD", "BRL", dec!(1)))
            .await
            .unwrap();

        assert_eq!(response.amount, dec!(5.50));
        assert_eq!(service.repo().lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_convert_with_quotes_single_attempt() {
        let service = CurrencyService::new(MockRepo::new(), MockQuotes::failing());

        let _ = service
            .convert_with_quotes(convert_req("USD", "BRL", dec!(10)))
            .await;

        assert_eq!(service.quotes().requested().len(), 1);
    }

    #[tokio::test]
    async fn test_convert_with_quotes_no_caching() {
        let service = CurrencyService::new(
            MockRepo::new(),
            MockQuotes::returning(&[("USDBRL", "5.50")]),
        );

        for _ in 0..3 {
            service
                .convert_with_quotes(convert_req("USD", "BRL", dec!(1)))
                .await
                .unwrap();
        }

        assert_eq!(service.quotes().requested().len(), 3);
    }

    #[test]
    fn test_mock_quote_response_shape() {
        let quotes = MockQuotes::returning(&[("USDBRL", "5.50")]);
        let expected: QuoteResponse =
            HashMap::from([("USDBRL".to_string(), Quote::with_high("5.50"))]);
        assert_eq!(quotes.outcome.as_ref().unwrap(), &expected);
    }
}
