use crate::error::AnalyticsError;
use crate::rows::{
    CategoryPriceSummary, CategoryProductRank, ComboOrder, CustomerOrderGap, CustomerOrderSpan,
    CustomerRetention, CustomerRevenue, CustomerSales, GenderRevenue, MonthOrderCount,
    MonthTopProduct, ProductContribution, ProductMonthQuantity, ProductQuantity, RevenueDay,
    RunningTotal,
};
use chrono::NaiveDate;
use core_types::{EnrichedOrder, MonthBucket, MonthGrouping, Product};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

/// A stateless calculator for deriving business metrics from the enriched
/// order view.
///
/// Shared grouping rules across all operations:
/// - groups form in first-encounter order of their key;
/// - descending sorts are stable, so ties keep encounter order;
/// - month-grouped metrics bucket dates per the configured `MonthGrouping`.
#[derive(Debug, Default)]
pub struct MetricsEngine {
    month_grouping: MonthGrouping,
}

impl MetricsEngine {
    pub fn new(month_grouping: MonthGrouping) -> Self {
        Self { month_grouping }
    }

    pub fn month_grouping(&self) -> MonthGrouping {
        self.month_grouping
    }

    /// Total revenue per customer. Customers without orders are excluded.
    pub fn total_sales_per_customer(&self, orders: &[EnrichedOrder]) -> Vec<CustomerSales> {
        group_in_order(orders, |o| o.customer_id)
            .into_iter()
            .map(|(customer_id, rows)| CustomerSales {
                customer_id,
                full_name: rows[0].full_name.clone(),
                total_sales: sum_revenue(&rows),
            })
            .collect()
    }

    /// Order count per month bucket, rows in chronological bucket order.
    pub fn orders_per_month(&self, orders: &[EnrichedOrder]) -> Vec<MonthOrderCount> {
        let mut groups = group_in_order(orders, |o| self.month_grouping.bucket(o.order_date));
        groups.sort_by_key(|(bucket, _)| *bucket);

        groups
            .into_iter()
            .map(|(bucket, rows)| MonthOrderCount {
                month: bucket.label(),
                order_count: rows.len(),
            })
            .collect()
    }

    /// The `n` products with the most units sold, descending; ties keep
    /// encounter order.
    pub fn top_products(&self, orders: &[EnrichedOrder], n: usize) -> Vec<ProductQuantity> {
        let mut totals: Vec<ProductQuantity> = group_in_order(orders, |o| o.product_id)
            .into_iter()
            .map(|(product_id, rows)| ProductQuantity {
                product_id,
                product_name: rows[0].product_name.clone(),
                total_quantity: sum_quantity(&rows),
            })
            .collect();

        totals.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
        totals.truncate(n);
        totals
    }

    /// Cumulative revenue per customer along ascending order date.
    ///
    /// Window frame: each row's running total is the sum over all of the
    /// customer's rows with order date <= the row's own date, so rows sharing
    /// a date all carry the cumulative value at the end of that date.
    pub fn running_total_per_customer(&self, orders: &[EnrichedOrder]) -> Vec<RunningTotal> {
        let mut result = Vec::with_capacity(orders.len());

        for (customer_id, mut rows) in group_in_order(orders, |o| o.customer_id) {
            rows.sort_by_key(|o| o.order_date);

            let mut cumulative = Decimal::ZERO;
            let mut i = 0;
            while i < rows.len() {
                // Advance over the run of rows sharing this date.
                let mut j = i;
                while j < rows.len() && rows[j].order_date == rows[i].order_date {
                    cumulative += rows[j].revenue;
                    j += 1;
                }
                for row in &rows[i..j] {
                    result.push(RunningTotal {
                        customer_id,
                        order_id: row.order_id,
                        order_date: row.order_date,
                        running_total: cumulative,
                    });
                }
                i = j;
            }
        }

        result
    }

    /// Products ranked by total revenue within their category, using standard
    /// competition ranking (ties share a rank, the next rank skips).
    pub fn rank_products_by_revenue_per_category(
        &self,
        orders: &[EnrichedOrder],
    ) -> Vec<CategoryProductRank> {
        let mut result = Vec::new();

        for (category, rows) in group_in_order(orders, |o| o.category.clone()) {
            let mut totals: Vec<(u32, String, Decimal)> = group_in_order(rows.iter().copied(), |o| o.product_id)
                .into_iter()
                .map(|(product_id, product_rows)| {
                    (
                        product_id,
                        product_rows[0].product_name.clone(),
                        sum_revenue(&product_rows),
                    )
                })
                .collect();
            totals.sort_by(|a, b| b.2.cmp(&a.2));

            let ranks = competition_ranks(&totals.iter().map(|t| t.2).collect::<Vec<_>>());
            for ((product_id, product_name, total_revenue), rank) in totals.into_iter().zip(ranks) {
                result.push(CategoryProductRank {
                    category: category.clone(),
                    product_id,
                    product_name,
                    total_revenue,
                    rank,
                });
            }
        }

        result
    }

    /// First and last order date per customer.
    pub fn first_last_order_per_customer(&self, orders: &[EnrichedOrder]) -> Vec<CustomerOrderSpan> {
        group_in_order(orders, |o| o.customer_id)
            .into_iter()
            .map(|(customer_id, rows)| {
                let first = rows.iter().map(|o| o.order_date).min().unwrap_or_default();
                let last = rows.iter().map(|o| o.order_date).max().unwrap_or_default();
                CustomerOrderSpan {
                    customer_id,
                    full_name: rows[0].full_name.clone(),
                    first_order_date: first,
                    last_order_date: last,
                }
            })
            .collect()
    }

    /// Distinct active month buckets per customer; retained means activity in
    /// more than one bucket.
    pub fn customer_retention(&self, orders: &[EnrichedOrder]) -> Vec<CustomerRetention> {
        group_in_order(orders, |o| o.customer_id)
            .into_iter()
            .map(|(customer_id, rows)| {
                let mut buckets: Vec<MonthBucket> = rows
                    .iter()
                    .map(|o| self.month_grouping.bucket(o.order_date))
                    .collect();
                buckets.sort();
                buckets.dedup();

                CustomerRetention {
                    customer_id,
                    full_name: rows[0].full_name.clone(),
                    active_months: buckets.len(),
                    retained: buckets.len() > 1,
                }
            })
            .collect()
    }

    /// Average whole-day gap between consecutive orders per customer. The
    /// first order has no gap; customers with a single order are excluded.
    pub fn average_days_between_orders(&self, orders: &[EnrichedOrder]) -> Vec<CustomerOrderGap> {
        let mut result = Vec::new();

        for (customer_id, mut rows) in group_in_order(orders, |o| o.customer_id) {
            if rows.len() < 2 {
                continue;
            }
            rows.sort_by_key(|o| o.order_date);

            let gaps: Vec<i64> = rows
                .windows(2)
                .map(|w| (w[1].order_date - w[0].order_date).num_days())
                .collect();
            let total: i64 = gaps.iter().sum();
            let average = Decimal::from(total) / Decimal::from(gaps.len() as u64);

            result.push(CustomerOrderGap {
                customer_id,
                full_name: rows[0].full_name.clone(),
                avg_days_between_orders: round_half_up(average),
            });
        }

        result
    }

    /// The single day with the highest total revenue. The first day
    /// encountered wins a tie. Fails with `NoData` on empty input.
    pub fn highest_revenue_day(
        &self,
        orders: &[EnrichedOrder],
    ) -> Result<RevenueDay, AnalyticsError> {
        let days: Vec<(NaiveDate, Decimal)> = group_in_order(orders, |o| o.order_date)
            .into_iter()
            .map(|(date, rows)| (date, sum_revenue(&rows)))
            .collect();

        days.into_iter()
            // Strictly-greater keeps the first encountered day on ties.
            .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
            .map(|(order_date, total_revenue)| RevenueDay {
                order_date,
                total_revenue,
            })
            .ok_or(AnalyticsError::NoData("highest_revenue_day"))
    }

    /// Min, max and average unit price per category, over the catalog itself.
    pub fn price_summary_by_category(&self, products: &[Product]) -> Vec<CategoryPriceSummary> {
        group_in_order(products, |p| p.category.clone())
            .into_iter()
            .map(|(category, rows)| {
                let prices: Vec<Decimal> = rows.iter().map(|p| p.price).collect();
                let sum: Decimal = prices.iter().sum();
                CategoryPriceSummary {
                    category,
                    min_price: prices.iter().copied().min().unwrap_or_default(),
                    max_price: prices.iter().copied().max().unwrap_or_default(),
                    avg_price: round_half_up(sum / Decimal::from(prices.len() as u64)),
                }
            })
            .collect()
    }

    /// Units sold per (product, month bucket); rows grouped by product in
    /// encounter order, buckets chronological within each product.
    pub fn monthly_sales_per_product(&self, orders: &[EnrichedOrder]) -> Vec<ProductMonthQuantity> {
        let mut result = Vec::new();

        for (product_id, rows) in group_in_order(orders, |o| o.product_id) {
            let product_name = rows[0].product_name.clone();
            let mut buckets =
                group_in_order(rows.iter().copied(), |o| self.month_grouping.bucket(o.order_date));
            buckets.sort_by_key(|(bucket, _)| *bucket);

            for (bucket, bucket_rows) in buckets {
                result.push(ProductMonthQuantity {
                    product_id,
                    product_name: product_name.clone(),
                    month: bucket.label(),
                    total_quantity: sum_quantity(&bucket_rows),
                });
            }
        }

        result
    }

    /// The rank-1 product(s) by revenue for each month bucket; revenue ties
    /// keep every tied product.
    pub fn top_revenue_product_per_month(&self, orders: &[EnrichedOrder]) -> Vec<MonthTopProduct> {
        let mut months = group_in_order(orders, |o| self.month_grouping.bucket(o.order_date));
        months.sort_by_key(|(bucket, _)| *bucket);

        let mut result = Vec::new();
        for (bucket, rows) in months {
            let mut totals: Vec<(u32, String, Decimal)> = group_in_order(rows.iter().copied(), |o| o.product_id)
                .into_iter()
                .map(|(product_id, product_rows)| {
                    (
                        product_id,
                        product_rows[0].product_name.clone(),
                        sum_revenue(&product_rows),
                    )
                })
                .collect();
            totals.sort_by(|a, b| b.2.cmp(&a.2));

            let Some(top_revenue) = totals.first().map(|t| t.2) else {
                continue;
            };
            for (product_id, product_name, total_revenue) in totals {
                if total_revenue < top_revenue {
                    break;
                }
                result.push(MonthTopProduct {
                    month: bucket.label(),
                    product_id,
                    product_name,
                    total_revenue,
                });
            }
        }

        result
    }

    /// Revenue summed per customer gender.
    pub fn revenue_per_gender(&self, orders: &[EnrichedOrder]) -> Vec<GenderRevenue> {
        group_in_order(orders, |o| o.gender)
            .into_iter()
            .map(|(gender, rows)| GenderRevenue {
                gender,
                total_revenue: sum_revenue(&rows),
            })
            .collect()
    }

    /// The `n` customers with the highest total revenue, descending; ties
    /// keep encounter order.
    pub fn top_customers_by_revenue(&self, orders: &[EnrichedOrder], n: usize) -> Vec<CustomerRevenue> {
        let mut totals: Vec<CustomerRevenue> = group_in_order(orders, |o| o.customer_id)
            .into_iter()
            .map(|(customer_id, rows)| CustomerRevenue {
                customer_id,
                full_name: rows[0].full_name.clone(),
                total_revenue: sum_revenue(&rows),
            })
            .collect();

        totals.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
        totals.truncate(n);
        totals
    }

    /// Each product's share of total revenue, in percent rounded half-up to
    /// two decimal places.
    pub fn revenue_percent_contribution(&self, orders: &[EnrichedOrder]) -> Vec<ProductContribution> {
        let totals = group_in_order(orders, |o| o.product_id);
        let grand_total: Decimal = orders.iter().map(|o| o.revenue).sum();

        totals
            .into_iter()
            .map(|(product_id, rows)| {
                let total_revenue = sum_revenue(&rows);
                let pct_of_total = if grand_total.is_zero() {
                    Decimal::ZERO
                } else {
                    round_half_up(total_revenue / grand_total * Decimal::from(100))
                };
                ProductContribution {
                    product_id,
                    product_name: rows[0].product_name.clone(),
                    total_revenue,
                    pct_of_total,
                }
            })
            .collect()
    }

    /// (customer, date) groups containing more than one distinct product.
    /// One customer-day models one basket, since the raw schema carries no
    /// shared order-header id across line items.
    pub fn combo_orders(&self, orders: &[EnrichedOrder]) -> Vec<ComboOrder> {
        group_in_order(orders, |o| (o.customer_id, o.order_date))
            .into_iter()
            .filter_map(|((customer_id, order_date), rows)| {
                let mut product_ids: Vec<u32> = rows.iter().map(|o| o.product_id).collect();
                product_ids.sort_unstable();
                product_ids.dedup();

                (product_ids.len() > 1).then_some(ComboOrder {
                    customer_id,
                    order_date,
                    num_products: product_ids.len(),
                })
            })
            .collect()
    }
}

/// Groups `items` by `key`, with groups (and members) in first-encounter order.
fn group_in_order<'a, T, K, F, I>(items: I, key: F) -> Vec<(K, Vec<&'a T>)>
where
    I: IntoIterator<Item = &'a T>,
    K: Eq + std::hash::Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&T>)> = Vec::new();

    for item in items {
        let k = key(item);
        match positions.get(&k) {
            Some(&i) => groups[i].1.push(item),
            None => {
                positions.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }

    groups
}

fn sum_revenue(rows: &[&EnrichedOrder]) -> Decimal {
    rows.iter().map(|o| o.revenue).sum()
}

fn sum_quantity(rows: &[&EnrichedOrder]) -> u64 {
    rows.iter().map(|o| o.quantity as u64).sum()
}

/// Standard competition ranking over values already sorted descending: ties
/// share a rank and the following rank skips by the tie width.
fn competition_ranks(sorted_desc: &[Decimal]) -> Vec<u32> {
    let mut ranks = Vec::with_capacity(sorted_desc.len());
    for (i, value) in sorted_desc.iter().enumerate() {
        if i > 0 && *value == sorted_desc[i - 1] {
            ranks.push(ranks[i - 1]);
        } else {
            ranks.push(i as u32 + 1);
        }
    }
    ranks
}

fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Gender;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct OrderFixture {
        order_id: u32,
        customer_id: u32,
        product_id: u32,
        quantity: u32,
        date: NaiveDate,
        price: Decimal,
        category: &'static str,
        gender: Gender,
    }

    fn order(fx: OrderFixture) -> EnrichedOrder {
        EnrichedOrder {
            order_id: fx.order_id,
            customer_id: fx.customer_id,
            product_id: fx.product_id,
            quantity: fx.quantity,
            order_date: fx.date,
            product_name: format!("Product {}", fx.product_id),
            category: fx.category.to_string(),
            price: fx.price,
            full_name: format!("Customer {}", fx.customer_id),
            gender: fx.gender,
            join_date: date(2023, 1, 1),
            revenue: Decimal::from(fx.quantity) * fx.price,
        }
    }

    fn simple(
        order_id: u32,
        customer_id: u32,
        product_id: u32,
        quantity: u32,
        d: NaiveDate,
        price: Decimal,
    ) -> EnrichedOrder {
        order(OrderFixture {
            order_id,
            customer_id,
            product_id,
            quantity,
            date: d,
            price,
            category: "Office",
            gender: Gender::Female,
        })
    }

    fn engine() -> MetricsEngine {
        MetricsEngine::new(MonthGrouping::CalendarMonth)
    }

    /// The Ann/Pen dataset: one customer, one 2.00 product, orders of 3 and 2
    /// units a month apart.
    fn ann_and_pen() -> Vec<EnrichedOrder> {
        vec![
            simple(100, 1, 10, 3, date(2023, 2, 1), dec!(2.00)),
            simple(101, 1, 10, 2, date(2023, 3, 1), dec!(2.00)),
        ]
    }

    #[test]
    fn total_sales_matches_direct_sum() {
        let rows = ann_and_pen();
        let totals = engine().total_sales_per_customer(&rows);

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].customer_id, 1);
        assert_eq!(totals[0].total_sales, dec!(10.00));
    }

    #[test]
    fn running_total_is_monotonic_and_ends_at_total() {
        let rows = ann_and_pen();
        let eng = engine();
        let running = eng.running_total_per_customer(&rows);

        assert_eq!(running.len(), 2);
        assert_eq!(running[0].order_date, date(2023, 2, 1));
        assert_eq!(running[0].running_total, dec!(6.00));
        assert_eq!(running[1].running_total, dec!(10.00));
        assert!(running.windows(2).all(|w| w[0].running_total <= w[1].running_total));

        let totals = eng.total_sales_per_customer(&rows);
        assert_eq!(running.last().unwrap().running_total, totals[0].total_sales);
    }

    #[test]
    fn running_total_shares_value_across_equal_dates() {
        let rows = vec![
            simple(1, 1, 10, 1, date(2023, 2, 1), dec!(2.00)),
            simple(2, 1, 10, 2, date(2023, 2, 1), dec!(2.00)),
            simple(3, 1, 10, 1, date(2023, 3, 1), dec!(2.00)),
        ];
        let running = engine().running_total_per_customer(&rows);

        // Both 2023-02-01 rows include the full revenue of that date.
        assert_eq!(running[0].running_total, dec!(6.00));
        assert_eq!(running[1].running_total, dec!(6.00));
        assert_eq!(running[2].running_total, dec!(8.00));
    }

    #[test]
    fn average_gap_in_whole_days() {
        let gaps = engine().average_days_between_orders(&ann_and_pen());

        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].avg_days_between_orders, dec!(28.00));
    }

    #[test]
    fn single_order_customer_has_no_gap_row() {
        let rows = vec![simple(1, 1, 10, 1, date(2023, 2, 1), dec!(2.00))];
        assert!(engine().average_days_between_orders(&rows).is_empty());
    }

    #[test]
    fn competition_ranking_within_category() {
        let rows = vec![
            simple(1, 1, 10, 5, date(2023, 2, 1), dec!(2.00)), // 10.00
            simple(2, 1, 11, 5, date(2023, 2, 2), dec!(2.00)), // 10.00, tied
            simple(3, 1, 12, 1, date(2023, 2, 3), dec!(2.00)), // 2.00
        ];
        let ranked = engine().rank_products_by_revenue_per_category(&rows);

        assert_eq!(ranked.len(), 3);
        assert_eq!((ranked[0].product_id, ranked[0].rank), (10, 1));
        assert_eq!((ranked[1].product_id, ranked[1].rank), (11, 1));
        // Two rank-1 products, so the next rank skips to 3.
        assert_eq!((ranked[2].product_id, ranked[2].rank), (12, 3));

        // Strictly higher revenue always means a strictly smaller rank.
        for a in &ranked {
            for b in &ranked {
                if a.category == b.category && a.total_revenue > b.total_revenue {
                    assert!(a.rank < b.rank);
                }
            }
        }
    }

    #[test]
    fn top_products_stable_on_ties() {
        let rows = vec![
            simple(1, 1, 10, 3, date(2023, 2, 1), dec!(1.00)),
            simple(2, 1, 11, 3, date(2023, 2, 2), dec!(1.00)),
            simple(3, 1, 12, 9, date(2023, 2, 3), dec!(1.00)),
        ];
        let top = engine().top_products(&rows, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].product_id, 12);
        // 10 and 11 tie on quantity; 10 was encountered first.
        assert_eq!(top[1].product_id, 10);
    }

    #[test]
    fn percent_contribution_sums_to_hundred() {
        let rows = vec![
            simple(1, 1, 10, 1, date(2023, 2, 1), dec!(3.00)),
            simple(2, 1, 11, 1, date(2023, 2, 2), dec!(3.00)),
            simple(3, 1, 12, 1, date(2023, 2, 3), dec!(3.00)),
        ];
        let contributions = engine().revenue_percent_contribution(&rows);

        let total: Decimal = contributions.iter().map(|c| c.pct_of_total).sum();
        assert!((total - dec!(100.00)).abs() <= dec!(0.02), "sum was {total}");
        // 1/3 rounds half-up to 33.33.
        assert_eq!(contributions[0].pct_of_total, dec!(33.33));
    }

    #[test]
    fn orders_per_month_merges_years_by_default() {
        let rows = vec![
            simple(1, 1, 10, 1, date(2023, 2, 5), dec!(1.00)),
            simple(2, 1, 10, 1, date(2024, 2, 9), dec!(1.00)),
            simple(3, 1, 10, 1, date(2023, 12, 1), dec!(1.00)),
        ];

        let merged = engine().orders_per_month(&rows);
        assert_eq!(merged.len(), 2);
        assert_eq!((merged[0].month.as_str(), merged[0].order_count), ("February", 2));
        assert_eq!((merged[1].month.as_str(), merged[1].order_count), ("December", 1));

        let split = MetricsEngine::new(MonthGrouping::YearMonth).orders_per_month(&rows);
        assert_eq!(split.len(), 3);
        assert_eq!(split[0].month, "2023-02");
        assert_eq!(split[2].month, "2024-02");
    }

    #[test]
    fn retention_counts_distinct_months() {
        let rows = vec![
            simple(1, 1, 10, 1, date(2023, 2, 1), dec!(1.00)),
            simple(2, 1, 10, 1, date(2023, 2, 20), dec!(1.00)),
            simple(3, 1, 10, 1, date(2023, 3, 1), dec!(1.00)),
            simple(4, 2, 10, 1, date(2023, 2, 1), dec!(1.00)),
        ];
        let retention = engine().customer_retention(&rows);

        assert_eq!(retention.len(), 2);
        assert_eq!((retention[0].active_months, retention[0].retained), (2, true));
        assert_eq!((retention[1].active_months, retention[1].retained), (1, false));
    }

    #[test]
    fn highest_revenue_day_prefers_first_on_tie() {
        let rows = vec![
            simple(1, 1, 10, 2, date(2023, 2, 1), dec!(2.00)),
            simple(2, 1, 10, 2, date(2023, 2, 3), dec!(2.00)),
        ];
        let day = engine().highest_revenue_day(&rows).unwrap();
        assert_eq!(day.order_date, date(2023, 2, 1));
        assert_eq!(day.total_revenue, dec!(4.00));
    }

    #[test]
    fn highest_revenue_day_on_empty_is_no_data() {
        let err = engine().highest_revenue_day(&[]).unwrap_err();
        assert!(matches!(err, AnalyticsError::NoData("highest_revenue_day")));
    }

    #[test]
    fn empty_input_yields_empty_tables() {
        let eng = engine();
        assert!(eng.total_sales_per_customer(&[]).is_empty());
        assert!(eng.orders_per_month(&[]).is_empty());
        assert!(eng.running_total_per_customer(&[]).is_empty());
        assert!(eng.combo_orders(&[]).is_empty());
        assert!(eng.revenue_percent_contribution(&[]).is_empty());
        assert!(eng.top_revenue_product_per_month(&[]).is_empty());
    }

    #[test]
    fn price_summary_is_catalog_weighted() {
        let products = vec![
            Product {
                product_id: 10,
                product_name: "Pen".to_string(),
                category: "Office".to_string(),
                price: dec!(2.00),
            },
            Product {
                product_id: 11,
                product_name: "Desk".to_string(),
                category: "Office".to_string(),
                price: dec!(5.00),
            },
        ];
        let summary = engine().price_summary_by_category(&products);

        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].min_price, dec!(2.00));
        assert_eq!(summary[0].max_price, dec!(5.00));
        assert_eq!(summary[0].avg_price, dec!(3.50));
    }

    #[test]
    fn month_top_product_keeps_all_ties() {
        let rows = vec![
            simple(1, 1, 10, 2, date(2023, 2, 1), dec!(3.00)), // 6.00
            simple(2, 1, 11, 3, date(2023, 2, 2), dec!(2.00)), // 6.00, tied
            simple(3, 1, 12, 1, date(2023, 2, 3), dec!(1.00)), // 1.00
        ];
        let top = engine().top_revenue_product_per_month(&rows);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].product_id, 10);
        assert_eq!(top[1].product_id, 11);
    }

    #[test]
    fn revenue_per_gender_joins_through_customer() {
        let rows = vec![
            order(OrderFixture {
                order_id: 1,
                customer_id: 1,
                product_id: 10,
                quantity: 1,
                date: date(2023, 2, 1),
                price: dec!(4.00),
                category: "Office",
                gender: Gender::Female,
            }),
            order(OrderFixture {
                order_id: 2,
                customer_id: 2,
                product_id: 10,
                quantity: 2,
                date: date(2023, 2, 2),
                price: dec!(4.00),
                category: "Office",
                gender: Gender::Male,
            }),
        ];
        let by_gender = engine().revenue_per_gender(&rows);

        assert_eq!(by_gender.len(), 2);
        assert_eq!((by_gender[0].gender, by_gender[0].total_revenue), (Gender::Female, dec!(4.00)));
        assert_eq!((by_gender[1].gender, by_gender[1].total_revenue), (Gender::Male, dec!(8.00)));
    }

    #[test]
    fn combo_orders_need_distinct_products() {
        let rows = vec![
            simple(1, 1, 10, 1, date(2023, 2, 1), dec!(1.00)),
            simple(2, 1, 11, 1, date(2023, 2, 1), dec!(1.00)),
            // Same product twice on one day is not a combo.
            simple(3, 2, 10, 1, date(2023, 2, 1), dec!(1.00)),
            simple(4, 2, 10, 1, date(2023, 2, 1), dec!(1.00)),
        ];
        let combos = engine().combo_orders(&rows);

        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].customer_id, 1);
        assert_eq!(combos[0].num_products, 2);
    }

    #[test]
    fn monthly_sales_per_product_sums_quantities() {
        let rows = vec![
            simple(1, 1, 10, 2, date(2023, 2, 1), dec!(1.00)),
            simple(2, 1, 10, 3, date(2023, 2, 15), dec!(1.00)),
            simple(3, 1, 10, 1, date(2023, 3, 1), dec!(1.00)),
        ];
        let monthly = engine().monthly_sales_per_product(&rows);

        assert_eq!(monthly.len(), 2);
        assert_eq!((monthly[0].month.as_str(), monthly[0].total_quantity), ("February", 5));
        assert_eq!((monthly[1].month.as_str(), monthly[1].total_quantity), ("March", 1));
    }

    #[test]
    fn rerun_is_idempotent() {
        let rows = ann_and_pen();
        let eng = engine();
        assert_eq!(
            eng.running_total_per_customer(&rows),
            eng.running_total_per_customer(&rows)
        );
        assert_eq!(eng.top_products(&rows, 5), eng.top_products(&rows, 5));
    }
}
