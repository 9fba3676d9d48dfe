use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use std::io::Write;
use vkplot::vankrevelen::{self, ChartAppearance, PlotStyle, RatioRecord, StyleValue, TableFormat};

// two jittered clusters, enough spread for a well-conditioned kde
fn sample_ratios(n: usize) -> Vec<RatioRecord> {
    let mut rng = StdRng::seed_from_u64(7);
    let centers = [(0.3, 1.5), (0.7, 0.8)];
    (0..n)
        .map(|i| {
            let (oc, hc) = centers[i % centers.len()];
            RatioRecord::new(
                oc + rng.random_range(-0.08..0.08),
                hc + rng.random_range(-0.15..0.15),
            )
        })
        .collect()
}

#[test]
fn plot_writes_a_png() {
    let dir = tempfile::tempdir().unwrap();
    let name = dir.path().join("vk.png");
    let name = name.to_str().unwrap();

    let ratios = sample_ratios(50);
    vankrevelen::plot(name, &ratios, &PlotStyle::new(), &ChartAppearance::default(), (640, 480)).unwrap();

    let bytes = std::fs::read(name).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
}

#[test]
fn density_colored_plot_writes_an_svg() {
    let dir = tempfile::tempdir().unwrap();
    let name = dir.path().join("vk.svg");
    let name = name.to_str().unwrap();

    let ratios = sample_ratios(40);
    let style = PlotStyle::new().set(vankrevelen::COLOR_KEY, StyleValue::Text("density".to_string()));
    vankrevelen::plot(name, &ratios, &style, &ChartAppearance::default(), (640, 480)).unwrap();

    let text = std::fs::read_to_string(name).unwrap();
    assert!(text.contains("<svg"));
    assert!(text.contains("circle"));
}

#[test]
fn table_to_figure_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("ratios.csv");
    {
        let mut file = std::fs::File::create(&table).unwrap();
        writeln!(file, "formula,O/C,H/C").unwrap();
        for r in sample_ratios(20) {
            writeln!(file, "x,{},{}", r.oc().unwrap(), r.hc().unwrap()).unwrap();
        }
    }

    let ratios = vankrevelen::load_ratio_table(table.to_str().unwrap(), TableFormat::Infer).unwrap();
    assert_eq!(ratios.len(), 20);

    let name = dir.path().join("vk.png");
    let style = PlotStyle::new()
        .set(vankrevelen::COLOR_KEY, StyleValue::Text("#ff8000".to_string()))
        .set("s", StyleValue::Scalar(5.0));
    vankrevelen::plot(name.to_str().unwrap(), &ratios, &style, &ChartAppearance::default(), (400, 300)).unwrap();

    let bytes = std::fs::read(&name).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
}
