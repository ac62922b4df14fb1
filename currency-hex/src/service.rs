//! Currency Application Service
//!
//! Orchestrates catalog and conversion operations through the store and
//! quote ports. Contains NO infrastructure logic - pure business orchestration.

use std::str::FromStr;

use rust_decimal::Decimal;

use currency_types::{
    AppError, ConvertCurrencyRequest, ConvertCurrencyResponse, CreateCurrencyRequest,
    CurrencyId, CurrencyRepository, CurrencyResponse, DomainError, NewCurrency, PairCode,
    QuoteError, QuoteProvider,
};

/// Application service for currency operations.
///
/// Generic over `R: CurrencyRepository` and `Q: QuoteProvider` - adapters are
/// injected at compile time. Every call is a single pass over the ports with
/// no state kept between calls.
pub struct CurrencyService<R: CurrencyRepository, Q: QuoteProvider> {
    repo: R,
    quotes: Q,
}

impl<R: CurrencyRepository, Q: QuoteProvider> CurrencyService<R, Q> {
    /// Creates a new currency service with the given store and quote provider.
    pub fn new(repo: R, quotes: Q) -> Self {
        Self { repo, quotes }
    }

    /// Returns a reference to the underlying store.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns a reference to the underlying quote provider.
    pub fn quotes(&self) -> &Q {
        &self.quotes
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Catalog Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists all currencies as `"<id> - <name>"` labels, in store order.
    pub async fn list(&self) -> Result<Vec<CurrencyResponse>, AppError> {
        let currencies = self.repo.find_all().await?;
        Ok(currencies.iter().map(CurrencyResponse::from).collect())
    }

    /// Registers a new currency and returns its id.
    pub async fn create(&self, req: CreateCurrencyRequest) -> Result<CurrencyId, AppError> {
        let currency = NewCurrency::new(req.name, req.description, req.exchanges)?;

        if self.repo.find_by_name(&currency.name).await?.is_some() {
            return Err(DomainError::DuplicateCurrency(currency.name).into());
        }

        let saved = self.repo.save(currency).await?;
        tracing::info!(id = %saved.id, name = %saved.name, "Currency created");
        Ok(saved.id)
    }

    /// Deletes a currency. Unknown ids are a no-op.
    pub async fn delete(&self, id: CurrencyId) -> Result<(), AppError> {
        self.repo.delete_by_id(id).await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Converts using the rate stored on the source currency.
    pub async fn convert(
        &self,
        req: ConvertCurrencyRequest,
    ) -> Result<ConvertCurrencyResponse, AppError> {
        validate_amount(req.amount)?;

        let currency = self
            .repo
            .find_by_name(&req.from)
            .await?
            .ok_or_else(|| DomainError::CurrencyNotFound(req.from.clone()))?;

        let rate = currency
            .rate_to(&req.to)
            .ok_or_else(|| DomainError::ExchangeRateNotFound {
                from: req.from.clone(),
                to: req.to.clone(),
            })?;

        Ok(ConvertCurrencyResponse {
            amount: multiply(req.amount, rate)?,
        })
    }

    /// Converts using the live "high" price from the quote provider.
    ///
    /// Every provider failure surfaces as `AppError::QuoteUnavailable`;
    /// the cause is only logged.
    pub async fn convert_with_quotes(
        &self,
        req: ConvertCurrencyRequest,
    ) -> Result<ConvertCurrencyResponse, AppError> {
        validate_amount(req.amount)?;

        let pair = PairCode::new(&req.from, &req.to);
        let high = self.quote_high(&pair).await.map_err(|e| {
            tracing::warn!(pair = %pair, error = %e, "Live quote unavailable");
            AppError::QuoteUnavailable
        })?;

        Ok(ConvertCurrencyResponse {
            amount: multiply(req.amount, high)?,
        })
    }

    async fn quote_high(&self, pair: &PairCode) -> Result<Decimal, QuoteError> {
        let key = pair.key();
        let quotes = self.quotes.get_quote(&pair.query()).await?;
        let quote = quotes
            .get(&key)
            .ok_or_else(|| QuoteError::MissingPair(key.clone()))?;

        Decimal::from_str(quote.high.trim()).map_err(|_| QuoteError::InvalidPrice {
            pair: key,
            price: quote.high.clone(),
        })
    }
}

fn validate_amount(amount: Decimal) -> Result<(), AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::BadRequest("Amount must be positive".into()));
    }
    Ok(())
}

/// Multiplies without rounding. Products that `Decimal` cannot hold exactly
/// (too large, or more than 28 fractional digits) are rejected.
fn multiply(amount: Decimal, rate: Decimal) -> Result<Decimal, AppError> {
    let (a, r) = (amount.normalize(), rate.normalize());
    let scale = a.scale() + r.scale();
    if scale > MAX_SCALE {
        return Err(AppError::BadRequest(
            "Converted amount cannot be represented exactly".into(),
        ));
    }

    // checked_mul drops fractional digits instead of failing when the
    // mantissa overflows, which shows up as a reduced scale
    let exact = a
        .checked_mul(r)
        .filter(|product| product.scale() == scale)
        .ok_or_else(|| AppError::BadRequest("Converted amount is out of range".into()))?;

    // Keep the caller's scale (10 x 5.50 = 55.00) when it carries no extra digits
    Ok(match amount.checked_mul(rate) {
        Some(product) if product == exact => product,
        _ => exact,
    })
}

const MAX_SCALE: u32 = 28;
