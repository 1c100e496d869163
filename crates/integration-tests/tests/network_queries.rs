//! Network Query Scenarios
//!
//! NetworkService wired to mock ports (and the real PATH probe where noted).

use std::sync::Arc;

use hostq_core::application::NetworkService;
use hostq_core::domain::{
    AggregatedError, BackendSelector, CommandError, DeviceId, DeviceNotFoundError,
    InterfaceState, InterfaceType, NetBackend, NetInterface, NetInterfaces, NotSupportedError,
};
use hostq_core::port::capability_probe::mocks::MockCapabilityProbe;
use hostq_core::port::command_runner::mocks::MockCommandRunner;
use hostq_infra_system::PathProbe;

const NMCLI_TWO_DEVICES: &str = "\
GENERAL.DEVICE:                         eth0
GENERAL.TYPE:                           ethernet
GENERAL.STATE:                          100 (connected)
GENERAL.CONNECTION:                     Wired connection 1
IP4.ADDRESS[1]:                         10.0.0.5/24

GENERAL.DEVICE:                         wlan0
GENERAL.TYPE:                           wifi
GENERAL.STATE:                          100 (connected)
GENERAL.CONNECTION:                     Cafe
IP4.ADDRESS[1]:                         172.16.4.20/22
";

const IP_WLAN_ONLY: &str = "\
3: wlan0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc noqueue state UP group default qlen 1000
    link/ether 3c:a9:f4:00:11:22 brd ff:ff:ff:ff:ff:ff
    inet 172.16.4.20/22 brd 172.16.7.255 scope global dynamic wlan0
       valid_lft 3500sec preferred_lft 3500sec
";

fn service(runner: &MockCommandRunner, installed: &[&str]) -> NetworkService {
    NetworkService::new(
        Arc::new(runner.clone()),
        Arc::new(MockCapabilityProbe::new(installed.iter().copied())),
    )
}

#[test]
fn test_query_one_returns_matching_device() {
    let runner = MockCommandRunner::new().with_output("nmcli", NMCLI_TWO_DEVICES);
    let service = service(&runner, &["nmcli", "ip"]);

    let eth0 = service
        .query_one(&DeviceId::from("eth0"), BackendSelector::All)
        .unwrap();

    assert_eq!(eth0.device.as_str(), "eth0");
    assert_eq!(eth0.interface_type, Some(InterfaceType::Ethernet));
}

#[test]
fn test_query_one_reports_device_not_found() {
    let runner = MockCommandRunner::new().with_output("ip", IP_WLAN_ONLY);
    let service = service(&runner, &["ip"]);

    let err = service
        .query_one(&DeviceId::from("eth0"), BackendSelector::All)
        .unwrap_err();

    let not_found = err.downcast::<DeviceNotFoundError>().unwrap();
    assert_eq!(not_found, DeviceNotFoundError::new("eth0"));
}

#[test]
fn test_query_one_propagates_upstream_aggregate() {
    let runner = MockCommandRunner::new();
    let service = service(&runner, &[]);

    let err = service
        .query_one(&DeviceId::from("eth0"), BackendSelector::All)
        .unwrap_err();

    assert!(err.is::<AggregatedError>());
    assert!(!err.is::<DeviceNotFoundError>());
}

#[test]
fn test_nothing_installed_reports_each_backend() {
    let runner = MockCommandRunner::new();
    let service = service(&runner, &[]);

    let err = service.query_all(BackendSelector::All).unwrap_err();

    assert!(err.to_string().starts_with("Found 2 exception(s):"));
    let causes = err.downcast::<AggregatedError>().unwrap().into_causes();
    let backends: Vec<String> = causes
        .into_iter()
        .map(|c| c.downcast::<NotSupportedError>().unwrap().backend_name)
        .collect();
    assert_eq!(backends, vec!["nmcli", "ip"]);
    assert_eq!(runner.call_count(), 0);
}

#[test]
fn test_nmcli_daemon_down_falls_back_to_ip() {
    let runner = MockCommandRunner::new()
        .with_failure("nmcli", "NetworkManager is not running.")
        .with_output("ip", IP_WLAN_ONLY);
    let service = service(&runner, &["nmcli", "ip"]);

    let interfaces = service.query_all(BackendSelector::All).unwrap();

    assert_eq!(interfaces.len(), 1);
    assert_eq!(runner.calls(), vec!["nmcli device show", "ip address show"]);
}

#[test]
fn test_pinned_backend_error_is_untouched() {
    let runner = MockCommandRunner::new().with_failure("ip", "Cannot open netlink socket");
    let service = service(&runner, &["nmcli", "ip"]);

    let selector = BackendSelector::All.merge(BackendSelector::Only(NetBackend::Ip));
    let err = service.query_all(selector).unwrap_err();

    let command_error = err.downcast::<CommandError>().unwrap();
    assert_eq!(command_error.command, "ip address show");
    assert_eq!(runner.call_count(), 1);
}

#[test]
fn test_find_up_scenario() {
    let named = |name: &str, kind: InterfaceType, state: InterfaceState| NetInterface {
        interface_type: Some(kind),
        name: Some(name.to_string()),
        ..NetInterface::new(name.to_lowercase(), state)
    };
    let interfaces = NetInterfaces::new(vec![
        named("LoopUp", InterfaceType::Loopback, InterfaceState::Up),
        named("WifiDown", InterfaceType::Wifi, InterfaceState::Down),
        named("WifiUp", InterfaceType::Wifi, InterfaceState::Up),
    ]);

    let up = interfaces.find_up().unwrap();

    assert_eq!(up.name.as_deref(), Some("WifiUp"));
    assert!(NetInterfaces::new(vec![]).find_up().is_none());
}

#[test]
fn test_find_up_on_queried_interfaces() {
    let runner = MockCommandRunner::new().with_output("nmcli", NMCLI_TWO_DEVICES);
    let service = service(&runner, &["nmcli"]);

    let interfaces = service.query_all(BackendSelector::All).unwrap();

    assert_eq!(interfaces.find_up().unwrap().device.as_str(), "eth0");
}

#[test]
fn test_real_path_probe_skips_missing_tools() {
    let runner = MockCommandRunner::new();
    let service = NetworkService::new(Arc::new(runner.clone()), Arc::new(PathProbe));

    // Whatever is installed, every failure must be attributed to a backend
    match service.query_all(BackendSelector::All) {
        Ok(_) => panic!("mock runner has no canned output, query cannot succeed"),
        Err(err) => {
            let aggregated = err.downcast::<AggregatedError>().unwrap();
            assert_eq!(aggregated.cause_count(), 2);
            assert!(runner.call_count() <= 2);
        }
    }
}
