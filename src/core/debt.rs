use std::collections::BTreeMap;

use tracing::debug;

use super::money::{PAID_OFF_EPSILON, percent_to_fraction, round_cents};
use super::types::{
    BalanceSnapshot, Debt, DebtPayoffInputs, DebtPayoffResult, PayoffComparison, PayoffEvent,
    PayoffMethod,
};

/// Fifty years of monthly payments.
pub const MAX_PAYOFF_MONTHS: u32 = 600;

const DETAILED_SNAPSHOT_MONTHS: u32 = 12;
const SNAPSHOT_STRIDE: u32 = 3;

#[derive(Debug)]
struct WorkingDebt<'a> {
    name: &'a str,
    monthly_rate: f64,
    min_payment: f64,
    remaining: f64,
    paid_off: bool,
}

#[derive(Debug)]
struct PayoffState<'a> {
    debts: Vec<WorkingDebt<'a>>,
    order: Vec<usize>,
    month: u32,
    total_interest: f64,
    total_paid: f64,
    payoff_order: Vec<PayoffEvent>,
}

impl<'a> PayoffState<'a> {
    fn new(debts: &'a [Debt], method: PayoffMethod) -> Self {
        let working: Vec<WorkingDebt<'a>> = debts
            .iter()
            .filter(|d| d.balance > 0.0 && d.min_payment > 0.0)
            .map(|d| WorkingDebt {
                name: d.name.as_str(),
                monthly_rate: percent_to_fraction(d.rate) / 12.0,
                min_payment: d.min_payment,
                remaining: d.balance,
                paid_off: false,
            })
            .collect();

        let order = strategy_order(&working, method);
        Self {
            debts: working,
            order,
            month: 0,
            total_interest: 0.0,
            total_paid: 0.0,
            payoff_order: Vec::new(),
        }
    }

    fn has_open_balance(&self) -> bool {
        self.debts.iter().any(|d| d.remaining > PAID_OFF_EPSILON)
    }

    fn retire(&mut self, idx: usize) -> f64 {
        let debt = &mut self.debts[idx];
        debt.remaining = 0.0;
        debt.paid_off = true;
        self.payoff_order.push(PayoffEvent {
            name: debt.name.to_string(),
            month: self.month,
        });
        debt.min_payment
    }

    /// One month: interest and minimums on every open debt, then the extra
    /// pool in strategy order. A freed minimum only tops up this month's pool.
    fn run_month(&mut self, extra_payment: f64) {
        self.month += 1;
        let mut pool = extra_payment;

        for idx in 0..self.debts.len() {
            if self.debts[idx].paid_off {
                continue;
            }
            let debt = &mut self.debts[idx];
            let interest = debt.remaining * debt.monthly_rate;
            debt.remaining += interest;
            self.total_interest += interest;

            let payment = debt.min_payment.min(debt.remaining);
            debt.remaining -= payment;
            self.total_paid += payment;

            if debt.remaining <= PAID_OFF_EPSILON {
                pool += self.retire(idx);
            }
        }

        for position in 0..self.order.len() {
            if pool <= PAID_OFF_EPSILON {
                break;
            }
            let idx = self.order[position];
            let debt = &mut self.debts[idx];
            if debt.paid_off {
                continue;
            }
            let payment = pool.min(debt.remaining);
            debt.remaining -= payment;
            pool -= payment;
            self.total_paid += payment;

            if debt.remaining <= PAID_OFF_EPSILON {
                pool += self.retire(idx);
            }
        }
    }

    fn snapshot(&self) -> BalanceSnapshot {
        let balances = self
            .debts
            .iter()
            .map(|d| (d.name.to_string(), round_cents(d.remaining.max(0.0))))
            .collect::<BTreeMap<_, _>>();
        BalanceSnapshot {
            month: self.month,
            balances,
        }
    }
}

pub fn simulate_debt_payoff(inputs: &DebtPayoffInputs) -> DebtPayoffResult {
    let mut state = PayoffState::new(&inputs.debts, inputs.method);
    if state.debts.is_empty() {
        return DebtPayoffResult {
            method: inputs.method,
            ..DebtPayoffResult::default()
        };
    }

    let extra_payment = inputs.extra_payment.max(0.0);
    let mut monthly_schedule = vec![BalanceSnapshot {
        month: 0,
        balances: state
            .debts
            .iter()
            .map(|d| (d.name.to_string(), d.remaining))
            .collect(),
    }];

    while state.has_open_balance() && state.month < MAX_PAYOFF_MONTHS {
        state.run_month(extra_payment);
        let finished = !state.has_open_balance();
        if state.month <= DETAILED_SNAPSHOT_MONTHS
            || state.month % SNAPSHOT_STRIDE == 0
            || finished
        {
            monthly_schedule.push(state.snapshot());
        }
    }

    let hit_month_cap = state.has_open_balance();
    if hit_month_cap {
        debug!(
            months = state.month,
            method = ?inputs.method,
            "debt payoff stopped at the month cap with balances outstanding"
        );
    }

    DebtPayoffResult {
        method: inputs.method,
        months_to_payoff: state.month,
        total_interest: state.total_interest,
        total_paid: state.total_paid,
        hit_month_cap,
        payoff_order: state.payoff_order,
        monthly_schedule,
    }
}

pub fn compare_payoff_methods(debts: &[Debt], extra_payment: f64) -> PayoffComparison {
    let run = |method| {
        simulate_debt_payoff(&DebtPayoffInputs {
            debts: debts.to_vec(),
            extra_payment,
            method,
        })
    };
    let avalanche = run(PayoffMethod::Avalanche);
    let snowball = run(PayoffMethod::Snowball);

    PayoffComparison {
        interest_saved: snowball.total_interest - avalanche.total_interest,
        months_saved: snowball.months_to_payoff as i64 - avalanche.months_to_payoff as i64,
        avalanche,
        snowball,
    }
}

/// Indices in the order extra money is applied; stable for ties.
fn strategy_order(debts: &[WorkingDebt<'_>], method: PayoffMethod) -> Vec<usize> {
    let mut order: Vec<usize> = (0..debts.len()).collect();
    match method {
        PayoffMethod::Avalanche => {
            order.sort_by(|&a, &b| debts[b].monthly_rate.total_cmp(&debts[a].monthly_rate))
        }
        PayoffMethod::Snowball => {
            order.sort_by(|&a, &b| debts[a].remaining.total_cmp(&debts[b].remaining))
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn debt(name: &str, balance: f64, rate: f64, min_payment: f64) -> Debt {
        Debt {
            name: name.to_string(),
            balance,
            rate,
            min_payment,
        }
    }

    fn sample_debts() -> Vec<Debt> {
        vec![
            debt("CreditCard", 8_500.0, 22.99, 250.0),
            debt("CarLoan", 15_000.0, 6.5, 350.0),
            debt("StudentLoan", 28_000.0, 5.5, 300.0),
        ]
    }

    fn run(debts: Vec<Debt>, extra_payment: f64, method: PayoffMethod) -> DebtPayoffResult {
        simulate_debt_payoff(&DebtPayoffInputs {
            debts,
            extra_payment,
            method,
        })
    }

    #[test]
    fn first_snapshot_reproduces_input_balances() {
        let result = run(sample_debts(), 300.0, PayoffMethod::Avalanche);
        let first = &result.monthly_schedule[0];
        assert_eq!(first.month, 0);
        assert_eq!(first.balances["CreditCard"], 8_500.0);
        assert_eq!(first.balances["CarLoan"], 15_000.0);
        assert_eq!(first.balances["StudentLoan"], 28_000.0);
    }

    #[test]
    fn larger_extra_payment_pays_off_faster_and_cheaper() {
        for method in [PayoffMethod::Avalanche, PayoffMethod::Snowball] {
            let slow = run(sample_debts(), 100.0, method);
            let fast = run(sample_debts(), 500.0, method);
            assert!(fast.months_to_payoff < slow.months_to_payoff);
            assert!(fast.total_interest < slow.total_interest);
        }
    }

    #[test]
    fn all_debts_are_retired_in_payoff_order() {
        let result = run(sample_debts(), 500.0, PayoffMethod::Avalanche);
        assert!(!result.hit_month_cap);
        assert_eq!(result.payoff_order.len(), 3);
        assert_eq!(result.payoff_order[0].name, "CreditCard");
        for pair in result.payoff_order.windows(2) {
            assert!(pair[0].month <= pair[1].month);
        }
        assert_eq!(
            result.payoff_order.last().unwrap().month,
            result.months_to_payoff
        );
        let last = result.monthly_schedule.last().unwrap();
        assert_eq!(last.month, result.months_to_payoff);
        assert!(last.balances.values().all(|&b| b == 0.0));
    }

    #[test]
    fn snapshot_cadence_is_monthly_then_quarterly() {
        let result = run(sample_debts(), 100.0, PayoffMethod::Snowball);
        let months: Vec<u32> = result.monthly_schedule.iter().map(|s| s.month).collect();
        assert_eq!(&months[..13], &(0..=12).collect::<Vec<_>>()[..]);
        for &month in &months[13..months.len() - 1] {
            assert_eq!(month % 3, 0, "unexpected snapshot month {month}");
        }
        assert_eq!(*months.last().unwrap(), result.months_to_payoff);
    }

    #[test]
    fn avalanche_beats_snowball_when_orders_differ() {
        let debts = vec![
            debt("SmallLowRate", 1_000.0, 4.0, 50.0),
            debt("LargeHighRate", 6_000.0, 24.0, 150.0),
        ];
        let comparison = compare_payoff_methods(&debts, 200.0);
        assert_eq!(comparison.snowball.payoff_order[0].name, "SmallLowRate");
        assert!(comparison.avalanche.total_interest < comparison.snowball.total_interest);
        assert!(comparison.interest_saved > 0.0);
    }

    #[test]
    fn identical_orders_give_identical_results() {
        let comparison = compare_payoff_methods(&sample_debts(), 250.0);
        assert_eq!(
            comparison.avalanche.total_interest,
            comparison.snowball.total_interest
        );
        assert_eq!(comparison.months_saved, 0);
    }

    #[test]
    fn unpayable_debt_stops_at_month_cap() {
        let result = run(
            vec![debt("Runaway", 50_000.0, 30.0, 100.0)],
            0.0,
            PayoffMethod::Avalanche,
        );
        assert!(result.hit_month_cap);
        assert_eq!(result.months_to_payoff, MAX_PAYOFF_MONTHS);
        assert!(result.payoff_order.is_empty());
    }

    #[test]
    fn zero_balance_and_zero_minimum_debts_are_ignored() {
        let result = run(
            vec![
                debt("Empty", 0.0, 10.0, 50.0),
                debt("NoMinimum", 1_000.0, 10.0, 0.0),
            ],
            100.0,
            PayoffMethod::Snowball,
        );
        assert_eq!(result.months_to_payoff, 0);
        assert_eq!(result.total_interest, 0.0);
        assert!(result.monthly_schedule.is_empty());
        assert!(result.payoff_order.is_empty());
    }

    #[test]
    fn freed_minimum_only_tops_up_the_month_it_is_freed() {
        let result = run(
            vec![
                debt("Quick", 300.0, 0.0, 100.0),
                debt("Slow", 4_000.0, 0.0, 50.0),
            ],
            0.0,
            PayoffMethod::Snowball,
        );
        assert_eq!(result.payoff_order[0].name, "Quick");
        assert_eq!(result.payoff_order[0].month, 3);

        // Month 3 sends Quick's 100 to Slow, leaving 3750 at 50 a month.
        let month_three = &result.monthly_schedule[3];
        assert_eq!(month_three.month, 3);
        assert_eq!(month_three.balances["Slow"], 3_750.0);
        let month_four = &result.monthly_schedule[4];
        assert_eq!(month_four.balances["Slow"], 3_700.0);

        assert_eq!(result.payoff_order[1].name, "Slow");
        assert_eq!(result.months_to_payoff, 78);
        assert_eq!(result.total_paid, 4_300.0);
    }

    #[test]
    fn avalanche_can_cost_more_when_a_freed_minimum_lapses() {
        // Snowball clears Errand's remainder in month 1 and frees its minimum for
        // Card a month before avalanche does.
        let debts = vec![
            debt("Errand", 789.0, 5.09, 773.0),
            debt("Card", 9_662.0, 18.41, 773.0),
        ];
        let comparison = compare_payoff_methods(&debts, 719.0);
        assert_eq!(comparison.avalanche.months_to_payoff, 7);
        assert_eq!(comparison.snowball.months_to_payoff, 7);
        assert_eq!(comparison.snowball.payoff_order[0].month, 1);
        assert_eq!(comparison.avalanche.payoff_order[0].month, 2);
        assert!(comparison.interest_saved < 0.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_payoff_runs_are_bounded_and_start_from_inputs(
            rows in vec((1u32..40_000, 0u32..3_000, 10u32..800), 1..5),
            extra in 0u32..1_000
        ) {
            let debts: Vec<Debt> = rows
                .iter()
                .enumerate()
                .map(|(i, &(balance, rate_bp, min))| {
                    debt(&format!("debt{i}"), balance as f64, rate_bp as f64 / 100.0, min as f64)
                })
                .collect();

            for method in [PayoffMethod::Avalanche, PayoffMethod::Snowball] {
                let result = run(debts.clone(), extra as f64, method);
                prop_assert!(result.months_to_payoff <= MAX_PAYOFF_MONTHS);
                prop_assert!(result.total_interest >= 0.0);
                let first = &result.monthly_schedule[0];
                for d in &debts {
                    prop_assert_eq!(first.balances[&d.name], d.balance);
                }
                if !result.hit_month_cap {
                    prop_assert_eq!(result.payoff_order.len(), debts.len());
                }
            }

            let again = run(debts.clone(), extra as f64, PayoffMethod::Avalanche);
            prop_assert_eq!(again, run(debts, extra as f64, PayoffMethod::Avalanche));
        }

        #[test]
        fn prop_avalanche_never_worse_when_orders_agree(
            rows in vec((1u32..40_000, 0u32..3_000, 10u32..800), 1..5),
            extra in 0u32..1_000
        ) {
            let mut balances: Vec<u32> = rows.iter().map(|r| r.0).collect();
            let mut rates: Vec<u32> = rows.iter().map(|r| r.1).collect();
            balances.sort_unstable();
            rates.sort_unstable_by(|a, b| b.cmp(a));
            let debts: Vec<Debt> = rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let rate = rates[i] as f64 / 100.0;
                    debt(&format!("debt{i}"), balances[i] as f64, rate, row.2 as f64)
                })
                .collect();

            let comparison = compare_payoff_methods(&debts, extra as f64);
            prop_assert!(comparison.avalanche.total_interest <= comparison.snowball.total_interest);
            prop_assert_eq!(comparison.months_saved, 0);
        }
    }
}
