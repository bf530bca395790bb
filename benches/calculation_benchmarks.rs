//! Performance benchmarks for the TotalComp MX engine.
//!
//! This benchmark suite covers:
//! - Monthly ISR evaluation against the full 2025 table
//! - A Sueldos y Salarios package with every benefit elected
//! - A RESICO package
//! - Equity schedules of increasing length
//! - Comparison of a batch of packages
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use totalcomp_engine::calculation::{
    calculate_equity_schedule, calculate_isr, calculate_resico, calculate_sueldos_y_salarios,
    compare_packages,
};
use totalcomp_engine::config::{ConfigLoader, FiscalDataSource};
use totalcomp_engine::models::{
    BenefitElections, EquityConfig, PackageInput, PackageRegime, ResicoInput, SalaryQuote,
    SueldosInput,
};

/// Loads the shipped configuration.
fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/mx").expect("Failed to load config")
}

/// Creates a salaried input with every benefit elected.
fn full_benefits_input(gross: i64) -> SueldosInput {
    let mut input = SueldosInput::new(Decimal::from(gross));
    input.benefits = BenefitElections {
        has_aguinaldo: true,
        has_vales_despensa: true,
        vales_despensa_amount: Decimal::from(3_000),
        has_prima_vacacional: true,
        has_fondo_ahorro: true,
        ..BenefitElections::default()
    };
    input
}

/// Creates `count` alternating salaried and RESICO packages.
fn create_packages(count: usize) -> Vec<PackageInput> {
    (0..count)
        .map(|i| PackageInput {
            name: None,
            salary: SalaryQuote {
                amount: Decimal::from(20_000 + 1_000 * i as i64),
                currency: Default::default(),
                exchange_rate: None,
                pay_frequency: Default::default(),
                hours_per_week: None,
            },
            regime: if i % 2 == 0 {
                PackageRegime::SueldosYSalarios(BenefitElections::default())
            } else {
                PackageRegime::Resico {
                    unpaid_vacation_days: 10,
                }
            },
            years_of_service: None,
            other_benefits: vec![],
            equity: None,
        })
        .collect()
}

fn bench_isr(c: &mut Criterion) {
    let loader = load_config();
    let fiscal_year = loader.active_fiscal_year().unwrap();
    let brackets = loader.get_isr_brackets(fiscal_year.id).unwrap();
    let income = Decimal::from(45_000);

    c.bench_function("isr_monthly", |b| {
        b.iter(|| calculate_isr(black_box(income), black_box(&brackets)))
    });
}

fn bench_sueldos_full_benefits(c: &mut Criterion) {
    let loader = load_config();
    let fiscal_year = loader.active_fiscal_year().unwrap().clone();
    let input = full_benefits_input(45_000);

    c.bench_function("sueldos_full_benefits", |b| {
        b.iter(|| {
            calculate_sueldos_y_salarios(black_box(&input), black_box(&fiscal_year), &loader)
                .unwrap()
        })
    });
}

fn bench_resico(c: &mut Criterion) {
    let loader = load_config();
    let fiscal_year = loader.active_fiscal_year().unwrap().clone();
    let mut input = ResicoInput::new(Decimal::from(45_000));
    input.unpaid_vacation_days = 10;

    c.bench_function("resico", |b| {
        b.iter(|| calculate_resico(black_box(&input), black_box(&fiscal_year), &loader).unwrap())
    });
}

fn bench_equity_scaling(c: &mut Criterion) {
    let config = EquityConfig::new(
        Decimal::from(100_000),
        Some((Decimal::from(20_000), Decimal::from(40_000))),
        4,
        Decimal::from(20),
    );

    let mut group = c.benchmark_group("equity_scaling");

    for years in [4u32, 10, 30].iter() {
        group.throughput(Throughput::Elements(*years as u64));
        group.bench_with_input(BenchmarkId::from_parameter(years), years, |b, &years| {
            b.iter(|| calculate_equity_schedule(black_box(&config), years))
        });
    }

    group.finish();
}

fn bench_compare_packages(c: &mut Criterion) {
    let loader = load_config();
    let packages = create_packages(10);

    let mut group = c.benchmark_group("compare_packages");
    group.throughput(Throughput::Elements(10));

    group.bench_function("batch_10", |b| {
        b.iter(|| compare_packages(black_box(&packages), &loader).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_isr,
    bench_sueldos_full_benefits,
    bench_resico,
    bench_equity_scaling,
    bench_compare_packages,
);
criterion_main!(benches);
