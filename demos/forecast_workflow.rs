use budget_tree::{
    apply_realized, parse_reader, ComparativeAnalysis, ForecastMethod, Forecaster, LoaderConfig,
    RealizedEntry,
};
use rust_decimal::Decimal;

const CHART: &str = "\
3,300,Operating Costs,900,900,900,950,950,950,1000,1000,1000,1100,1100,1300
3.1,310,Personnel,600,600,600,620,620,620,640,640,640,700,700,850
3.1.1,311,Salaries,500,500,500,510,510,510,520,520,520,560,560,700
3.1.2,312,Benefits,100,100,100,110,110,110,120,120,120,140,140,150
3.2,320,Facilities,300,300,300,330,330,330,360,360,360,400,400,450
3.2.1,321,Rent,250,250,250,250,250,250,250,250,250,250,250,250
3.2.2,322,Utilities,50,50,50,80,80,80,110,110,110,150,150,200
4,400,Financial Costs,20,20,20,20,20,20,20,20,20,20,20,20
";

fn main() -> budget_tree::Result<()> {
    let mut chart = parse_reader(CHART.as_bytes(), &LoaderConfig::default())?;

    println!("{}", chart.to_markdown());

    Forecaster::apply_range(
        &mut chart,
        311,
        0,
        11,
        ForecastMethod::Percentage(Decimal::new(45, 1)),
    )?;
    Forecaster::apply_range(&mut chart, 321, 0, 11, ForecastMethod::CarryForward)?;
    Forecaster::apply_range(
        &mut chart,
        322,
        0,
        11,
        ForecastMethod::FixedAmount(Decimal::new(15, 0)),
    )?;

    let january = vec![
        RealizedEntry {
            code: 311,
            debit: Decimal::new(40, 0),
            credit: Decimal::new(560, 0),
        },
        RealizedEntry {
            code: 321,
            debit: Decimal::ZERO,
            credit: Decimal::new(250, 0),
        },
        RealizedEntry {
            code: 322,
            debit: Decimal::new(5, 0),
            credit: Decimal::new(70, 0),
        },
    ];
    let summary = apply_realized(&mut chart, 0, &january)?;
    println!("January actuals applied to {} lines", summary.updated);

    println!("{}", chart.forecast_to_csv()?);
    println!("{}", chart.realized_template_csv(1)?);

    let analysis = ComparativeAnalysis::build(&chart, 0, 1)?;
    println!("{}", analysis.to_csv()?);

    Ok(())
}
