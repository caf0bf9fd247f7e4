mod wifi;

use embassy_net::{Runner, Stack, StackResources};
use esp_hal::rng::Rng;
use esp_radio::wifi::{WifiController, WifiDevice};
use static_cell::StaticCell;

pub(crate) struct NetRuntime {
    pub(crate) wifi_controller: WifiController<'static>,
    pub(crate) net_runner: Runner<'static, WifiDevice<'static>>,
    pub(crate) stack: Stack<'static>,
    pub(crate) mac: [u8; 6],
}

pub(crate) fn setup(
    wifi: esp_hal::peripherals::WIFI<'static>,
) -> Result<NetRuntime, &'static str> {
    static RADIO_CTRL: StaticCell<esp_radio::Controller<'static>> = StaticCell::new();
    static STACK_RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();

    let radio_ctrl = esp_radio::init().map_err(|err| {
        esp_println::println!("net: esp_radio::init err={:?}", err);
        "radio init failed"
    })?;
    let radio_ctrl = RADIO_CTRL.init(radio_ctrl);

    let (wifi_controller, ifaces) = esp_radio::wifi::new(radio_ctrl, wifi, Default::default())
        .map_err(|err| {
            esp_println::println!("net: wifi init err={:?}", err);
            "wifi init failed"
        })?;

    let device = ifaces.sta;
    let mac = device.mac_address();

    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    let (stack, net_runner) = embassy_net::new(
        device,
        embassy_net::Config::dhcpv4(Default::default()),
        STACK_RESOURCES.init(StackResources::<3>::new()),
        seed,
    );

    Ok(NetRuntime {
        wifi_controller,
        net_runner,
        stack,
        mac,
    })
}

#[embassy_executor::task]
pub(crate) async fn connection_task(controller: WifiController<'static>, stack: Stack<'static>) {
    wifi::run_connection_task(controller, stack).await;
}

#[embassy_executor::task]
pub(crate) async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}
