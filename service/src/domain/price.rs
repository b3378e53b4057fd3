//! [`PriceCalculator`] definitions.

use std::collections::BTreeSet;

use common::{Money, Percent};
use derive_more::{Display, Error as StdError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

use super::{
    range::DateRange,
    venue::{add_on, Venue},
};

/// Fixed fees applied to every priced booking.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct FeeSchedule {
    /// Cleaning fee charged once per booking, in the venue's currency.
    #[default(Decimal::from(50_000))]
    pub cleaning_fee: Decimal,

    /// Tax rate applied to the subtotal.
    #[default(Percent::new(Decimal::new(75, 1)).expect("7.5 is within bounds"))]
    pub tax_rate: Percent,

    /// Fraction of the grand total payable as a deposit.
    #[default(Percent::new(Decimal::from(70)).expect("70 is within bounds"))]
    pub deposit: Percent,
}

/// Pure calculator deriving a [`PriceBreakdown`] from a booking selection.
///
/// Two invocations with identical inputs produce identical output: there is
/// no hidden state, no randomness and no clock access.
#[derive(Clone, Copy, Debug, Default)]
pub struct PriceCalculator {
    /// [`FeeSchedule`] this [`PriceCalculator`] applies.
    pub fees: FeeSchedule,
}

impl PriceCalculator {
    /// Creates a new [`PriceCalculator`] applying the provided
    /// [`FeeSchedule`].
    #[must_use]
    pub fn new(fees: FeeSchedule) -> Self {
        Self { fees }
    }

    /// Derives a [`PriceBreakdown`] for booking the provided [`Venue`] over
    /// the provided [`DateRange`] with the provided add-on selection.
    ///
    /// The venue fee sums the daily rate of each calendar day in the range,
    /// so per-weekday/weekend pricing is honored; flat pricing degenerates
    /// to `base price × days`. Duplicate add-on selections count once.
    ///
    /// # Errors
    ///
    /// [`Error::ForeignAddOn`] if a selected add-on doesn't belong to the
    /// [`Venue`]. Foreign selections are a caller error and are never
    /// silently summed.
    pub fn breakdown(
        &self,
        venue: &Venue,
        range: DateRange,
        selected: &[add_on::Id],
    ) -> Result<PriceBreakdown, Error> {
        let currency = venue.currency();

        let venue_fee: Decimal = range
            .days()
            .map(|d| venue.pricing.rate_for(d).amount)
            .sum();

        let mut add_ons_total = Decimal::ZERO;
        for id in selected.iter().copied().collect::<BTreeSet<_>>() {
            let add_on =
                venue.add_on(id).ok_or(Error::ForeignAddOn(id))?;
            add_ons_total += add_on.price.amount;
        }

        let cleaning_fee = self.fees.cleaning_fee;
        let subtotal = venue_fee + cleaning_fee + add_ons_total;
        let tax = Money::new(self.fees.tax_rate.of(subtotal), currency);
        let grand_total = Money::new(subtotal + tax.amount, currency);
        let deposit =
            Money::new(self.fees.deposit.of(grand_total.amount), currency);

        Ok(PriceBreakdown {
            venue_fee: Money::new(venue_fee, currency),
            cleaning_fee: Money::new(cleaning_fee, currency),
            add_ons_total: Money::new(add_ons_total, currency),
            subtotal: Money::new(subtotal, currency),
            tax,
            grand_total,
            deposit,
        })
    }
}

/// Error of a [`PriceCalculator`] invocation.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// Selected add-on doesn't belong to the priced venue.
    #[display("`AddOn(id: {_0})` doesn't belong to the venue")]
    ForeignAddOn(#[error(not(source))] add_on::Id),
}

/// Monetary breakdown of a booking selection.
///
/// Every recomputation produces a fresh value; breakdowns are never mutated
/// in place.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Venue fee over the selected range.
    pub venue_fee: Money,

    /// Cleaning fee, fixed per booking.
    pub cleaning_fee: Money,

    /// Total price of the selected add-ons.
    pub add_ons_total: Money,

    /// `venue_fee + cleaning_fee + add_ons_total`.
    pub subtotal: Money,

    /// Tax over the subtotal.
    pub tax: Money,

    /// `subtotal + tax`.
    pub grand_total: Money,

    /// Deposit payable upfront.
    pub deposit: Money,
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::{money::Currency, Date, Money};
    use rust_decimal::Decimal;

    use crate::domain::{
        range::DateRange,
        venue::{self, add_on, AddOn, Pricing, Venue},
    };

    use super::PriceCalculator;

    fn date(s: &str) -> Date {
        Date::from_str(s).unwrap()
    }

    fn ngn(amount: i64) -> Money {
        Money::new(Decimal::from(amount), Currency::Ngn)
    }

    fn venue(pricing: Pricing, add_ons: Vec<AddOn>) -> Venue {
        Venue {
            id: venue::Id::new(),
            slug: None,
            name: "Eko Hall".parse().unwrap(),
            address: "12 Marina Rd, Lagos".parse().unwrap(),
            image: None,
            pricing,
            add_ons,
        }
    }

    fn single_day(start: &str) -> DateRange {
        DateRange::from_parts(date(start), None).unwrap()
    }

    #[test]
    fn single_day_without_add_ons() {
        let calc = PriceCalculator::default();
        let venue = venue(Pricing::Flat(ngn(100_000)), vec![]);

        let b = calc
            .breakdown(&venue, single_day("2025-10-06"), &[])
            .unwrap();

        assert_eq!(b.venue_fee, ngn(100_000));
        assert_eq!(b.cleaning_fee, ngn(50_000));
        assert_eq!(b.add_ons_total, ngn(0));
        assert_eq!(b.subtotal, ngn(150_000));
        assert_eq!(b.tax, ngn(11_250));
        assert_eq!(b.grand_total, ngn(161_250));
        assert_eq!(b.deposit, ngn(112_875));
    }

    #[test]
    fn multi_day_with_add_on() {
        let calc = PriceCalculator::default();
        let catering = AddOn {
            id: add_on::Id::new(),
            name: "Catering".parse().unwrap(),
            price: ngn(350_000),
        };
        let venue =
            venue(Pricing::Flat(ngn(100_000)), vec![catering.clone()]);
        let range = DateRange::from_parts(
            date("2025-10-06"),
            Some(date("2025-10-08")),
        )
        .unwrap();

        let b = calc.breakdown(&venue, range, &[catering.id]).unwrap();

        assert_eq!(b.venue_fee, ngn(300_000));
        assert_eq!(b.subtotal, ngn(700_000));
        assert_eq!(b.tax, ngn(52_500));
        assert_eq!(b.grand_total, ngn(752_500));
    }

    #[test]
    fn additivity_and_deposit_bound() {
        let calc = PriceCalculator::default();
        let venue = venue(Pricing::Flat(ngn(123_457)), vec![]);
        let range = DateRange::from_parts(
            date("2025-10-06"),
            Some(date("2025-10-12")),
        )
        .unwrap();

        let b = calc.breakdown(&venue, range, &[]).unwrap();

        assert_eq!(
            b.grand_total.amount,
            b.subtotal.amount + b.tax.amount,
        );
        assert_eq!(
            b.subtotal.amount,
            b.venue_fee.amount
                + b.cleaning_fee.amount
                + b.add_ons_total.amount,
        );
        assert!(b.deposit.amount > Decimal::ZERO);
        assert!(b.deposit.amount < b.grand_total.amount);
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let calc = PriceCalculator::default();
        let dj = AddOn {
            id: add_on::Id::new(),
            name: "DJ".parse().unwrap(),
            price: ngn(80_000),
        };
        let venue = venue(Pricing::Flat(ngn(100_000)), vec![dj.clone()]);
        let range = DateRange::from_parts(
            date("2025-10-06"),
            Some(date("2025-10-07")),
        )
        .unwrap();

        let first = calc.breakdown(&venue, range, &[dj.id]).unwrap();
        let second = calc.breakdown(&venue, range, &[dj.id]).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn per_day_pricing_sums_each_calendar_day() {
        let calc = PriceCalculator::default();
        let venue = venue(
            Pricing::PerDay {
                weekday: ngn(100_000),
                weekend: ngn(150_000),
            },
            vec![],
        );
        // 2025-10-02 is a Thursday, so Thu + Fri + Sat.
        let range = DateRange::from_parts(
            date("2025-10-02"),
            Some(date("2025-10-04")),
        )
        .unwrap();

        let b = calc.breakdown(&venue, range, &[]).unwrap();

        assert_eq!(b.venue_fee, ngn(400_000));
    }

    #[test]
    fn foreign_add_on_is_rejected() {
        let calc = PriceCalculator::default();
        let venue = venue(Pricing::Flat(ngn(100_000)), vec![]);
        let foreign = add_on::Id::new();

        assert_eq!(
            calc.breakdown(&venue, single_day("2025-10-06"), &[foreign]),
            Err(super::Error::ForeignAddOn(foreign)),
        );
    }

    #[test]
    fn duplicate_selection_counts_once() {
        let calc = PriceCalculator::default();
        let dj = AddOn {
            id: add_on::Id::new(),
            name: "DJ".parse().unwrap(),
            price: ngn(80_000),
        };
        let venue = venue(Pricing::Flat(ngn(100_000)), vec![dj.clone()]);

        let b = calc
            .breakdown(&venue, single_day("2025-10-06"), &[dj.id, dj.id])
            .unwrap();

        assert_eq!(b.add_ons_total, ngn(80_000));
    }
}
