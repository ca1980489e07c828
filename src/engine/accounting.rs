//! The accounting engine: deposit, buy, and sell against an Account.
//!
//! Every operation validates completely before touching state, mutates the
//! account in one step, and appends exactly one history event. Persistence is
//! the caller's job; the engine never does I/O and never terminates the
//! process.

use crate::domain::{Account, Decimal, LedgerEvent, Symbol};
use crate::error::LedgerError;
use chrono::{DateTime, Utc};

/// Commission for a trade of the given notional value.
///
/// `max(rate_percent/100 * notional, minimum)` — a pure function of the
/// notional and the configured schedule, identical for buys and sells.
pub fn commission_for(account: &Account, notional: Decimal) -> Decimal {
    (account.commission_rate_percent / Decimal::hundred() * notional)
        .max_of(account.commission_minimum)
}

/// Checks that run before a buy needs a price.
///
/// Callers that still have a quote lookup ahead of them run this first, so a
/// bad request fails on its own merits rather than on the lookup.
pub fn precheck_buy(quantity: u64) -> Result<(), LedgerError> {
    if quantity == 0 {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}

/// Checks that run before a sell needs a price: positive quantity, and the
/// symbol must actually be held.
pub fn precheck_sell(
    account: &Account,
    symbol: &Symbol,
    quantity: u64,
) -> Result<(), LedgerError> {
    if quantity == 0 {
        return Err(LedgerError::InvalidAmount);
    }
    if !account.positions.contains_key(symbol) {
        return Err(LedgerError::NoSuchPosition(symbol.to_string()));
    }
    Ok(())
}

/// Add cash to the account.
///
/// Non-positive amounts are rejected; accepting them would let the cash
/// balance go negative.
pub fn deposit(
    account: &mut Account,
    amount: Decimal,
    now: DateTime<Utc>,
) -> Result<&LedgerEvent, LedgerError> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount);
    }

    account.cash_balance += amount;
    account.history.push(LedgerEvent::Deposit {
        amount,
        timestamp: now,
    });
    Ok(account.history.last().expect("event just appended"))
}

/// Buy `quantity` shares of `symbol` at the already-resolved `price`.
///
/// Debits notional plus commission from cash and merges the shares into the
/// position with a quantity-weighted average cost.
pub fn buy(
    account: &mut Account,
    symbol: Symbol,
    quantity: u64,
    price: Decimal,
    now: DateTime<Utc>,
) -> Result<&LedgerEvent, LedgerError> {
    precheck_buy(quantity)?;

    let notional = price * Decimal::from_u64(quantity);
    let commission = commission_for(account, notional);
    let required = notional + commission;
    if account.cash_balance < required {
        return Err(LedgerError::InsufficientFunds {
            available: account.cash_balance,
            required,
        });
    }

    account.add_shares(symbol.clone(), quantity, price);
    account.cash_balance -= required;
    account.commission_paid_total += commission;
    account.history.push(LedgerEvent::Buy {
        symbol,
        quantity,
        price,
        notional,
        commission,
        timestamp: now,
    });
    Ok(account.history.last().expect("event just appended"))
}

/// Sell `quantity` shares of `symbol` at the already-resolved `price`.
///
/// Credits notional minus commission to cash, records realized P&L against
/// the position's average cost, and removes the position entirely when it
/// reaches zero.
pub fn sell(
    account: &mut Account,
    symbol: Symbol,
    quantity: u64,
    price: Decimal,
    now: DateTime<Utc>,
) -> Result<&LedgerEvent, LedgerError> {
    precheck_sell(account, &symbol, quantity)?;

    let position = *account
        .positions
        .get(&symbol)
        .ok_or_else(|| LedgerError::NoSuchPosition(symbol.to_string()))?;

    let notional = price * Decimal::from_u64(quantity);
    let commission = commission_for(account, notional);

    // Even the liquidation proceeds cannot cover the commission.
    if account.cash_balance + notional < commission {
        return Err(LedgerError::InsufficientFunds {
            available: account.cash_balance + notional,
            required: commission,
        });
    }

    if quantity > position.quantity {
        return Err(LedgerError::OverSell {
            symbol: symbol.to_string(),
            held: position.quantity,
        });
    }

    // Realized P&L uses the average cost as it stood before the reduction.
    let realized_pnl = (price - position.average_cost) * Decimal::from_u64(quantity);

    account.remove_shares(&symbol, quantity);
    account.cash_balance += notional - commission;
    account.commission_paid_total += commission;
    account.history.push(LedgerEvent::Sell {
        symbol,
        quantity,
        price,
        notional,
        commission,
        realized_pnl,
        timestamp: now,
    });
    Ok(account.history.last().expect("event just appended"))
}
