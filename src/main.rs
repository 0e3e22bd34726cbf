//! Singapore property calculator CLI
//!
//! Thin presentation layer over the library: parses inputs, runs one
//! calculation and prints the result as text or JSON.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use sg_property_calc::buyer::load_scenarios;
use sg_property_calc::financing::amortization::MAX_SCHEDULE_YEARS;
use sg_property_calc::financing::{AmortizationSchedule, ComparisonRequest, LoanComparison, PaymentMilestone};
use sg_property_calc::format::{format_percent, format_sgd, format_sgd_cents, parse_amount, parse_count};
use sg_property_calc::investment::{LeaseDuty, MortgageTerms, Occupancy, RentalAnalysis, RentalInputs};
use sg_property_calc::sale::{SaleInputs, SaleProceeds};
use sg_property_calc::{
    BuyerProfile, CalcResult, Calculator, Citizenship, FlatType, PropertyOrder, PropertyType, PurchaseReport,
};
use std::convert::Infallible;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sg-property-calc",
    about = "Stamp duties, loan eligibility, yields and sale proceeds for Singapore residential property",
    version
)]
struct Cli {
    /// Directory of rate table CSVs (defaults to the built-in 2024 tables)
    #[arg(long, global = true)]
    rates: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Loan eligibility, stamp duties, upfront cash and grants for a purchase
    Purchase(PurchaseArgs),
    /// Rental yield and cash flow for an investment property
    Rental(RentalArgs),
    /// Compare sample bank packages for a loan
    Loans(LoanArgs),
    /// Month-by-month repayment schedule
    Amortize(AmortizeArgs),
    /// BUC progressive payment schedule
    Progress {
        #[arg(long, value_parser = amount)]
        price: f64,
    },
    /// Seller's net cash proceeds
    Sale(SaleArgs),
    /// Stamp duty on a tenancy agreement
    Lease {
        /// Monthly rent
        #[arg(long, value_parser = amount)]
        rent: f64,
        /// Lease duration in years (fractions allowed)
        #[arg(long, value_parser = amount)]
        years: f64,
    },
    /// Assess a CSV of purchase scenarios
    Batch {
        #[arg(long)]
        input: PathBuf,
        /// Write results here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct PurchaseArgs {
    #[arg(long)]
    citizenship: Citizenship,
    #[arg(long)]
    property_type: PropertyType,
    #[arg(long, value_parser = amount)]
    price: f64,
    /// Gross annual income
    #[arg(long, value_parser = amount, default_value = "0")]
    income: f64,
    #[arg(long, value_parser = amount, default_value = "0")]
    cpf: f64,
    #[arg(long, value_parser = amount, default_value = "0")]
    cash: f64,
    /// Residential properties already owned
    #[arg(long, value_parser = count, default_value = "0")]
    property_count: u32,
    #[arg(long)]
    first_time: bool,
}

#[derive(Args, Debug)]
struct RentalArgs {
    #[arg(long, value_parser = amount)]
    price: f64,
    /// Monthly rent
    #[arg(long, value_parser = amount)]
    rent: f64,
    /// Loan amount; omit for a cash purchase
    #[arg(long, value_parser = amount)]
    loan: Option<f64>,
    /// Annual interest rate in percent
    #[arg(long, value_parser = amount, default_value = "3.5")]
    rate: f64,
    #[arg(long, value_parser = amount, default_value = "25")]
    tenure: f64,
    #[arg(long, value_parser = amount, default_value = "0")]
    maintenance: f64,
    #[arg(long, value_parser = amount, default_value = "0")]
    sinking_fund: f64,
    /// Annual insurance premium
    #[arg(long, value_parser = amount, default_value = "0")]
    insurance: f64,
    /// IRAS Annual Value
    #[arg(long, value_parser = amount, default_value = "0")]
    annual_value: f64,
    /// Use the non-owner-occupied property tax schedule
    #[arg(long)]
    rented: bool,
}

#[derive(Args, Debug)]
struct LoanArgs {
    #[arg(long, value_parser = amount, default_value = "500000")]
    amount: f64,
    #[arg(long, value_parser = amount, default_value = "25")]
    tenure: f64,
    /// Gross monthly income, for the MSR check
    #[arg(long, value_parser = amount)]
    monthly_income: Option<f64>,
    #[arg(long)]
    property_type: Option<PropertyType>,
}

#[derive(Args, Debug)]
struct AmortizeArgs {
    #[arg(long, value_parser = amount)]
    principal: f64,
    /// Annual rate in percent; defaults to the TDSR stress rate
    #[arg(long, value_parser = amount)]
    rate: Option<f64>,
    #[arg(long, value_parser = amount, default_value = "25")]
    tenure: f64,
    /// Print every month instead of yearly totals
    #[arg(long)]
    monthly: bool,
}

#[derive(Args, Debug)]
struct SaleArgs {
    #[arg(long, value_parser = amount)]
    price: f64,
    #[arg(long, value_parser = amount, default_value = "0")]
    loan: f64,
    /// CPF principal used for the purchase
    #[arg(long, value_parser = amount, default_value = "0")]
    cpf_used: f64,
    #[arg(long, value_parser = amount, default_value = "0")]
    years_owned: f64,
    /// Agent commission in percent of selling price
    #[arg(long, value_parser = amount, default_value = "2")]
    commission: f64,
    #[arg(long, value_parser = amount, default_value = "3000")]
    legal_fees: f64,
    /// Purchase date (YYYY-MM-DD) when sold within the SSD window
    #[arg(long)]
    purchase_date: Option<NaiveDate>,
    /// Sale date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    sale_date: Option<NaiveDate>,
    /// First flat type when buying a new subsidised flat
    #[arg(long)]
    first_flat: Option<FlatType>,
    #[arg(long, value_parser = amount)]
    upgrading_costs: Option<f64>,
}

fn amount(raw: &str) -> Result<f64, Infallible> {
    Ok(parse_amount(raw))
}

fn count(raw: &str) -> CalcResult<u32> {
    parse_count("property-count", raw)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let calc = match &cli.rates {
        Some(path) => Calculator::from_csv_path(path)
            .with_context(|| format!("loading rate tables from {}", path.display()))?,
        None => Calculator::new(),
    };
    log::debug!("using rate tables '{}'", calc.tables().version);

    match cli.command {
        Command::Purchase(args) => {
            let profile = BuyerProfile {
                citizenship: args.citizenship,
                is_first_time: args.first_time,
                property_count: args.property_count,
                annual_income: args.income,
                cpf_savings: args.cpf,
                cash_savings: args.cash,
            };
            let order = PropertyOrder {
                property_type: args.property_type,
                property_price: args.price,
            };
            let report = calc.assess_purchase(&profile, &order)?;
            emit(cli.json, &report, print_purchase)?;
        }
        Command::Rental(args) => {
            let inputs = RentalInputs {
                purchase_price: args.price,
                monthly_rent: args.rent,
                financing: args.loan.map(|loan_amount| MortgageTerms {
                    loan_amount,
                    interest_rate: args.rate,
                    tenure_years: args.tenure,
                }),
                monthly_maintenance: args.maintenance,
                monthly_sinking_fund: args.sinking_fund,
                annual_insurance: args.insurance,
                annual_value: args.annual_value,
                occupancy: if args.rented {
                    Occupancy::Rented
                } else {
                    Occupancy::OwnerOccupied
                },
            };
            let analysis = calc.rental_analysis(&inputs);
            emit(cli.json, &analysis, print_rental)?;
        }
        Command::Loans(args) => {
            let request = ComparisonRequest {
                principal: args.amount,
                tenure_years: args.tenure,
                monthly_income: args.monthly_income,
                property_type: args.property_type,
            };
            emit(cli.json, &calc.compare_loans(&request), print_loans)?;
        }
        Command::Amortize(args) => {
            let schedule = calc.amortization(args.principal, args.rate.map(|r| r / 100.0), args.tenure);
            if args.monthly && !cli.json {
                print_monthly_schedule(&schedule);
            } else {
                emit(cli.json, &schedule, print_yearly_schedule)?;
            }
        }
        Command::Progress { price } => {
            emit(cli.json, calc.progress_payments(price).as_slice(), print_progress)?;
        }
        Command::Sale(args) => {
            let inputs = SaleInputs {
                selling_price: args.price,
                outstanding_loan: args.loan,
                cpf_used: args.cpf_used,
                years_owned: args.years_owned,
                agent_commission: args.commission,
                legal_fees: args.legal_fees,
                purchase_date: args.purchase_date,
                sale_date: args.sale_date.unwrap_or_else(|| Local::now().date_naive()),
                first_flat_type: args.first_flat,
                upgrading_costs: args.upgrading_costs,
            };
            emit(cli.json, &calc.sale_proceeds(&inputs), print_sale)?;
        }
        Command::Lease { rent, years } => {
            emit(cli.json, &calc.lease_stamp_duty(rent, years), print_lease)?;
        }
        Command::Batch { input, output } => run_batch(&calc, &input, output.as_ref())?,
    }

    Ok(())
}

fn emit<T: Serialize + ?Sized>(json: bool, value: &T, print: fn(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value).context("serializing result")?);
    } else {
        print(value);
    }
    Ok(())
}

fn print_purchase(report: &PurchaseReport) {
    let e = &report.loan_eligibility;
    let d = &report.stamp_duties;
    let a = &report.affordability;

    println!("{}\n", report.ownership_notice.message);

    println!("Loan eligibility (TDSR)");
    println!("  Monthly income:         {:>14}", format_sgd(e.monthly_income));
    println!("  Max debt service:       {:>14}", format_sgd(e.max_debt_service));
    println!("  Max loan:               {:>14}", format_sgd(e.max_loan));

    println!("\nStamp duties");
    println!("  BSD:                    {:>14}", format_sgd(d.bsd));
    println!("  ABSD ({:>4}%):           {:>14}", d.absd_rate, format_sgd(d.absd));
    println!("  Total:                  {:>14}", format_sgd(d.total));

    println!("\nAffordability");
    println!("  LTV loan limit:         {:>14}", format_sgd(a.ltv_loan_limit));
    println!("  Loan amount:            {:>14}", format_sgd(a.loan_amount));
    println!("  Downpayment:            {:>14}", format_sgd(a.total_downpayment));
    println!("    Cash:                 {:>14}", format_sgd(a.total_cash_for_downpayment));
    println!("    CPF:                  {:>14}", format_sgd(a.actual_cpf_used));
    println!("  Legal fees:             {:>14}", format_sgd(a.legal_fees));
    println!("  Upfront cash required:  {:>14}", format_sgd(a.total_upfront_cash_required));
    println!("  Total initial outlay:   {:>14}", format_sgd(a.total_initial_outlay));
    println!("  Renovation (reference): {:>14}", format_sgd(a.renovation_estimate));
    if let Some(warning) = &a.shortfall_warning {
        println!("\n  WARNING: {}", warning);
    }

    println!("\nGrants");
    for grant in &report.grants {
        println!("  - {}", grant);
    }
}

fn print_rental(analysis: &Option<RentalAnalysis>) {
    let Some(r) = analysis else {
        println!("Enter a purchase price and monthly rent to analyse yields.");
        return;
    };

    println!("Yields");
    println!("  Gross yield:            {:>10}", format_percent(r.gross_yield));
    println!("  Net yield:              {:>10}", format_percent(r.net_yield));
    match r.cash_on_cash_return {
        Some(coc) => println!("  Cash-on-cash return:    {:>10}", format_percent(coc)),
        None => println!("  Cash-on-cash return:    {:>10}", "n/a"),
    }

    println!("\nMonthly");
    println!("  Rent:                   {:>12}", format_sgd(r.monthly.rent));
    println!("  Mortgage:               {:>12}", format_sgd(r.monthly.mortgage));
    println!("  Property tax:           {:>12}", format_sgd(r.monthly.property_tax));
    println!("  Maintenance:            {:>12}", format_sgd(r.monthly.maintenance));
    println!("  Sinking fund:           {:>12}", format_sgd(r.monthly.sinking_fund));
    println!("  Insurance:              {:>12}", format_sgd(r.monthly.insurance));
    println!("  Recurring cash flow:    {:>12}", format_sgd(r.recurring_monthly_cash_flow));

    println!("\nAnnual");
    println!("  Recurring cash flow:    {:>12}", format_sgd(r.annual.recurring_cash_flow));
    println!("  Vacancy (1 month):      {:>12}", format_sgd(-r.annual.vacancy_cost));
    println!("  Agent fee (annualised): {:>12}", format_sgd(-r.annual.agent_fee));
    println!("  Adjusted net cash flow: {:>12}", format_sgd(r.adjusted_annual_net_cash_flow));
}

fn print_loans(comparison: &LoanComparison) {
    println!("{:<6} {:<9} {:>7} {:>12} {:>8}  {}", "Bank", "Type", "Rate", "Monthly", "Lock-in", "Thereafter");
    println!("{}", "-".repeat(72));
    for offer in &comparison.offers {
        println!(
            "{:<6} {:<9} {:>7} {:>12} {:>8}  {}{}",
            offer.bank,
            offer.kind.to_string(),
            format_percent(offer.rate),
            format_sgd(offer.monthly_repayment),
            offer.lock_in_years.as_deref().unwrap_or("-"),
            offer.subsequent,
            if offer.exceeds_msr { "  [exceeds MSR]" } else { "" },
        );
    }
    if let Some(limit) = comparison.msr_limit {
        println!("\nMSR limit: {} per month", format_sgd(limit));
        if comparison.any_exceeds_msr() {
            println!("Some packages exceed the 30% Mortgage Servicing Ratio for HDB/EC purchases.");
        }
    }
}

fn print_yearly_schedule(schedule: &AmortizationSchedule) {
    if schedule.rows.is_empty() {
        println!("Enter a positive principal and a tenure of at most {} years.", MAX_SCHEDULE_YEARS);
        return;
    }
    println!("Monthly payment: {}", format_sgd_cents(schedule.monthly_payment));
    println!("{:>4} {:>14} {:>14}", "Year", "Interest", "Principal");
    for (year, interest, principal) in schedule.yearly_totals() {
        println!("{:>4} {:>14} {:>14}", year, format_sgd(interest), format_sgd(principal));
    }
    println!("Total interest: {}", format_sgd(schedule.total_interest()));
}

fn print_monthly_schedule(schedule: &AmortizationSchedule) {
    println!("{:>5} {:>14} {:>12} {:>12} {:>12} {:>14}", "Month", "Opening", "Payment", "Interest", "Principal", "Closing");
    for row in &schedule.rows {
        println!(
            "{:>5} {:>14} {:>12} {:>12} {:>12} {:>14}",
            row.month,
            format_sgd(row.opening_balance),
            format_sgd_cents(row.payment),
            format_sgd_cents(row.interest),
            format_sgd_cents(row.principal),
            format_sgd(row.closing_balance),
        );
    }
}

fn print_progress(stages: &[PaymentMilestone]) {
    if stages.is_empty() {
        println!("Enter a positive purchase price.");
        return;
    }
    println!("{:<56} {:>5} {:>14} {:>14}", "Payment stage", "%", "Amount", "Cumulative");
    for stage in stages {
        println!(
            "{:<56} {:>4}% {:>14} {:>14}",
            stage.label,
            stage.percentage,
            format_sgd(stage.payment_amount),
            format_sgd(stage.cumulative_amount),
        );
    }
}

fn print_sale(proceeds: &Option<SaleProceeds>) {
    let Some(p) = proceeds else {
        println!("Enter a positive selling price.");
        return;
    };

    println!("Selling price:            {:>14}", format_sgd(p.selling_price));
    println!("  Outstanding loan:       {:>14}", format_sgd(p.outstanding_loan));
    println!("  CPF refund:             {:>14}", format_sgd(p.cpf_refund.total_refund));
    println!("    principal:            {:>14}", format_sgd(p.cpf_refund.principal));
    println!("    accrued interest:     {:>14}", format_sgd(p.cpf_refund.accrued_interest));
    println!("  Agent commission:       {:>14}", format_sgd(p.agent_fee));
    println!("  Legal fees:             {:>14}", format_sgd(p.legal_fees));
    if p.ssd.applicable {
        println!("  Seller's stamp duty {:>2}%: {:>14}", p.ssd.rate, format_sgd(p.ssd.amount));
    }
    if p.upgrading_costs > 0.0 {
        println!("  Upgrading costs:        {:>14}", format_sgd(p.upgrading_costs));
    }
    println!("Net cash proceeds:        {:>14}", format_sgd(p.display_net_proceeds()));
    if p.net_cash_proceeds < 0.0 {
        println!("  Deductions exceed the selling price by {}.", format_sgd(-p.net_cash_proceeds));
    }
    if p.resale_levy.applicable {
        println!(
            "\nResale levy on your next flat: {} (paid on the new flat, not deducted here)",
            format_sgd(p.resale_levy.amount)
        );
    }
}

fn print_lease(duty: &Option<LeaseDuty>) {
    match duty {
        Some(d) => {
            println!("Total rent:          {:>14}", format_sgd_cents(d.total_rent));
            println!("Average annual rent: {:>14}", format_sgd_cents(d.average_annual_rent));
            println!("Stamp duty payable:  {:>14}", format_sgd_cents(d.duty));
        }
        None => println!("Enter a positive monthly rent and lease duration."),
    }
}

/// One output line of a batch run
#[derive(Debug, Serialize)]
struct BatchRow {
    scenario_id: u32,
    max_loan: Option<f64>,
    loan_amount: Option<f64>,
    total_stamp_duty: Option<f64>,
    cash_downpayment: Option<f64>,
    cpf_used: Option<f64>,
    upfront_cash: Option<f64>,
    initial_outlay: Option<f64>,
    shortfall: Option<f64>,
    error: Option<String>,
}

fn run_batch(calc: &Calculator, input: &PathBuf, output: Option<&PathBuf>) -> Result<()> {
    let scenarios = load_scenarios(input).with_context(|| format!("reading scenarios from {}", input.display()))?;
    let results = calc.assess_batch(&scenarios);

    let rows = scenarios.iter().zip(results).map(|(scenario, (scenario_id, result))| match result {
        Ok(report) => {
            let a = &report.affordability;
            BatchRow {
                scenario_id,
                max_loan: Some(report.loan_eligibility.max_loan),
                loan_amount: Some(a.loan_amount),
                total_stamp_duty: Some(report.stamp_duties.total),
                cash_downpayment: Some(a.total_cash_for_downpayment),
                cpf_used: Some(a.actual_cpf_used),
                upfront_cash: Some(a.total_upfront_cash_required),
                initial_outlay: Some(a.total_initial_outlay),
                shortfall: Some(a.cash_shortfall(scenario.profile.cash_savings)),
                error: None,
            }
        }
        Err(err) => BatchRow {
            scenario_id,
            max_loan: None,
            loan_amount: None,
            total_stamp_duty: None,
            cash_downpayment: None,
            cpf_used: None,
            upfront_cash: None,
            initial_outlay: None,
            shortfall: None,
            error: Some(err.to_string()),
        },
    });

    let mut writer: csv::Writer<Box<dyn io::Write>> = match output {
        Some(path) => csv::Writer::from_writer(Box::new(
            std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => csv::Writer::from_writer(Box::new(io::stdout())),
    };
    let mut failed = 0;
    for row in rows {
        if row.error.is_some() {
            failed += 1;
        }
        writer.serialize(&row)?;
    }
    writer.flush()?;

    log::info!("batch complete: {} scenarios, {} rejected", scenarios.len(), failed);
    Ok(())
}
