use argh::FromArgs;
use pulsegen::{CliArgs, Config, WatchArgs};

#[test]
fn default_port() {
    let args = CliArgs::from_args(&["pulsegen"], &[]).unwrap();
    assert_eq!(args.port, 5502);
    assert_eq!(args.seed, None);
    let cfg = Config::from_args(&args);
    assert_eq!(cfg.endpoint(), "tcp://0.0.0.0:5502");
}

#[test]
fn explicit_port() {
    let args = CliArgs::from_args(&["pulsegen"], &["6000"]).unwrap();
    assert_eq!(Config::from_args(&args).port, 6000);
}

#[test]
fn non_numeric_port_refused() {
    assert!(CliArgs::from_args(&["pulsegen"], &["abc"]).is_err());
    assert!(CliArgs::from_args(&["pulsegen"], &["55.02"]).is_err());
    assert!(CliArgs::from_args(&["pulsegen"], &["70000"]).is_err());
}

#[test]
fn seed_option() {
    let args = CliArgs::from_args(&["pulsegen"], &["--seed", "42", "5510"]).unwrap();
    let cfg = Config::from_args(&args);
    assert_eq!(cfg.seed, Some(42));
    assert_eq!(cfg.port, 5510);
}

#[test]
fn watch_channels() {
    let args = WatchArgs::from_args(&["pulsewatch"], &["-c", "3", "--channel", "7"]).unwrap();
    assert_eq!(args.channel, vec![3, 7]);
    assert_eq!(args.addr, "127.0.0.1:5502");
}
