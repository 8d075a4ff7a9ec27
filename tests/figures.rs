use sensor_monitors::{
    charts::{self, ChartError},
    pca::PcaError,
    Error, ReadingsLoader,
};
use std::{collections::BTreeSet, fs, path::Path};
use tempfile::TempDir;

const FIGURES: [&str; 8] = [
    "temporal_combinado.png",
    "temporal_umidadear.png",
    "temporal_temp.png",
    "temporal_usolo.png",
    "boxplot_variaveis.png",
    "matriz_correlacao.png",
    "outliers_umidade.png",
    "pca_ambiental.png",
];

fn write_csv(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("DADOS.CSV");
    fs::write(&path, content).unwrap();
    path
}

fn readings() -> String {
    let mut content = String::from("Data,Hora,Temp,UmidadeAr,USolo,Bomba\n");
    let humidity = [52., 55., 54., 53., 56., 95., 51., 10., 54., 55.];
    for (i, h) in humidity.iter().enumerate() {
        content.push_str(&format!(
            "04/29/2025,{:02}:00,{},{},{},{}\n",
            i,
            20. + i as f64 * 0.5,
            h,
            30. + (i % 3) as f64,
            if i % 2 == 0 { "SIM" } else { "NAO" }
        ));
    }
    content
}

#[test]
fn missing_column_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let data = write_csv(
        dir.path(),
        "Data,Hora,Temp,UmidadeAr\n04/29/2025,10:00,20,50\n",
    );
    let output = dir.path().join("graficos");
    let err = charts::generate(&data, &output).unwrap_err();
    assert!(matches!(err, Error::Loader(_)));
    assert!(err.to_string().contains("'USolo'"));
    assert!(!output.exists());
}

fn written_names(output: &Path) -> BTreeSet<String> {
    fs::read_dir(output)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn generated_files() {
    let dir = TempDir::new().unwrap();
    let data = write_csv(dir.path(), &readings());
    let output = dir.path().join("graficos");
    let report = charts::generate(&data, &output).unwrap();
    assert!(report.failures.is_empty(), "{:?}", report.failures);
    let expected: BTreeSet<String> = FIGURES.iter().map(|f| f.to_string()).collect();
    let reported: BTreeSet<String> = report
        .files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(reported, expected);
    assert_eq!(written_names(&output), expected);
    for file in &report.files {
        assert!(fs::metadata(file).unwrap().len() > 0, "{:?}", file);
    }
}

#[test]
fn second_run_replaces_the_first() {
    let dir = TempDir::new().unwrap();
    let data = write_csv(dir.path(), &readings());
    let output = dir.path().join("graficos");
    let first = charts::generate(&data, &output).unwrap();
    assert!(first.failures.is_empty(), "{:?}", first.failures);
    let before = written_names(&output);

    // stale content is overwritten
    for file in &first.files {
        fs::write(file, b"stale").unwrap();
    }
    let second = charts::generate(&data, &output).unwrap();
    assert!(second.failures.is_empty(), "{:?}", second.failures);
    assert_eq!(first.files, second.files);
    assert_eq!(written_names(&output), before);
    for file in &second.files {
        assert_ne!(fs::read(file).unwrap(), b"stale", "{:?}", file);
    }
}

#[test]
fn failing_renderer_does_not_stop_the_others() {
    let dir = TempDir::new().unwrap();
    // a single complete row, PCA needs 2
    let data = write_csv(
        dir.path(),
        "Data,Hora,Temp,UmidadeAr,USolo\n\
         04/29/2025,10:00,20,50,30\n\
         04/29/2025,11:00,21,x,31\n\
         04/29/2025,12:00,22,55,y\n",
    );
    let readings = ReadingsLoader::default().data_path(&data).load().unwrap();
    let output = dir.path().join("graficos");
    let report = charts::render_all(&readings, &output).unwrap();
    let (name, err) = report
        .failures
        .iter()
        .find(|(name, _)| *name == "PCA")
        .unwrap();
    assert_eq!(*name, "PCA");
    assert!(matches!(err, ChartError::Pca(PcaError::NotEnoughSamples(1))));
    assert!(report
        .files
        .iter()
        .all(|f| f.exists() && !f.ends_with("pca_ambiental.png")));
}
