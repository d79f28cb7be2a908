//! Two-node CubeSat thermal model.
//!
//! Node 1 is the internal battery, node 2 the external shell. The shell
//! absorbs sunlight and albedo, trades infrared with the planet and radiates
//! to deep space; the two nodes exchange heat through `K` and `R`; a
//! thermostatic heater may inject power into the battery.
//!
//! ```text
//! dT1/dt = (P_exchange + q_heat) / C_int
//! dT2/dt = (q_solar + q_albedo + q_planet - q_space - P_exchange) / C_ext
//! ```

use ct_controls::{HeaterRelay, HeaterState, SampleClock, SampleConfig, SwitchState};
use ct_core::celsius_to_kelvin;
use ct_thermal::{NodeCoupling, OrbitEnvironment, ThermalError, ThermalNode};
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::events::SwitchLog;
use crate::model::TransientModel;

/// Temperatures of both nodes (°C), index-matched to `[T1, T2]`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct NodeTemperatures {
    pub internal_c: f64,
    pub external_c: f64,
}

impl NodeTemperatures {
    pub fn new(internal_c: f64, external_c: f64) -> Self {
        Self {
            internal_c,
            external_c,
        }
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.internal_c, self.external_c]
    }

    pub fn from_array([internal_c, external_c]: [f64; 2]) -> Self {
        Self::new(internal_c, external_c)
    }
}

/// Every heat term acting on the two nodes at one instant (W).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct HeatBalance {
    pub solar_w: f64,
    pub albedo_w: f64,
    pub planet_ir_w: f64,
    pub space_loss_w: f64,
    /// From the external into the internal node
    pub exchange_w: f64,
    pub heater_w: f64,
}

impl HeatBalance {
    /// Net heat into the internal node.
    pub fn net_internal_w(&self) -> f64 {
        self.exchange_w + self.heater_w
    }

    /// Net heat into the external node.
    pub fn net_external_w(&self) -> f64 {
        self.solar_w + self.albedo_w + self.planet_ir_w - self.space_loss_w - self.exchange_w
    }
}

/// Heater attached to the internal node.
#[derive(Clone, Debug)]
struct HeaterControl {
    relay: HeaterRelay,
    initial: HeaterState,
    sample: Option<SampleConfig>,
}

/// Two-node transient model with an optional thermostatic heater.
///
/// Heater state belongs to the model instance. It only changes in
/// [`TransientModel::sample_controls`]; `rhs` reads the held value.
#[derive(Clone, Debug)]
pub struct CubeSatModel {
    environment: OrbitEnvironment,
    coupling: NodeCoupling,
    internal: ThermalNode,
    external: ThermalNode,
    initial: NodeTemperatures,
    heater: Option<HeaterControl>,
    heater_state: HeaterState,
    clock: Option<SampleClock>,
    switch_log: SwitchLog,
}

impl CubeSatModel {
    /// Create a model without a heater.
    pub fn new(
        environment: OrbitEnvironment,
        coupling: NodeCoupling,
        internal: ThermalNode,
        external: ThermalNode,
        initial: NodeTemperatures,
    ) -> SimResult<Self> {
        environment.validate()?;
        for (t, what) in [
            (initial.internal_c, "initial internal temperature"),
            (initial.external_c, "initial external temperature"),
        ] {
            if !t.is_finite() {
                return Err(SimError::NonFinite {
                    what,
                    t: 0.0,
                    state: initial.as_array().to_vec(),
                });
            }
            if celsius_to_kelvin(t) < 0.0 {
                return Err(SimError::Thermal(ThermalError::InvalidParameter {
                    what,
                    value: t,
                    reason: "below absolute zero",
                }));
            }
        }
        Ok(Self {
            environment,
            coupling,
            internal,
            external,
            initial,
            heater: None,
            heater_state: HeaterState::default(),
            clock: None,
            switch_log: SwitchLog::default(),
        })
    }

    /// Attach a thermostatic heater to the internal node.
    pub fn with_heater(mut self, relay: HeaterRelay, initial: SwitchState) -> Self {
        self.heater = Some(HeaterControl {
            relay,
            initial: HeaterState::new(initial),
            sample: None,
        });
        self.heater_state = HeaterState::new(initial);
        self.switch_log = SwitchLog::new(0.0, initial);
        self
    }

    /// Evaluate the heater relay at a fixed sample period instead of every step.
    ///
    /// Has no effect unless a heater is attached.
    pub fn with_heater_sample_period(mut self, sample: SampleConfig) -> Self {
        if let Some(heater) = self.heater.as_mut() {
            heater.sample = Some(sample);
        }
        self
    }

    pub fn environment(&self) -> &OrbitEnvironment {
        &self.environment
    }

    pub fn coupling(&self) -> &NodeCoupling {
        &self.coupling
    }

    pub fn internal_node(&self) -> &ThermalNode {
        &self.internal
    }

    pub fn external_node(&self) -> &ThermalNode {
        &self.external
    }

    pub fn heater_relay(&self) -> Option<&HeaterRelay> {
        self.heater.as_ref().map(|h| &h.relay)
    }

    pub fn heater_state(&self) -> HeaterState {
        self.heater_state
    }

    /// Heater output currently held (W); zero without a heater.
    pub fn heater_output_w(&self) -> f64 {
        self.heater_output_for(self.heater_state.switch)
    }

    fn heater_output_for(&self, switch: SwitchState) -> f64 {
        self.heater
            .as_ref()
            .map_or(0.0, |h| h.relay.output_w(&HeaterState::new(switch)))
    }

    pub fn switch_log(&self) -> &SwitchLog {
        &self.switch_log
    }

    /// Heat terms at `t` for state `x` with the given heater output.
    pub fn heat_balance(
        &self,
        t: f64,
        x: &NodeTemperatures,
        heater_w: f64,
    ) -> SimResult<HeatBalance> {
        let domain = |e: ThermalError| numeric_domain(e, t, x);

        let sun = self.environment.illumination(t);
        let shell_k = celsius_to_kelvin(x.external_c);
        let planet_ir_w = self.environment.planet_ir_w(shell_k).map_err(domain)?;
        let space_loss_w = self.environment.space_loss_w(shell_k).map_err(domain)?;
        let exchange_w = self
            .coupling
            .power_w(x.internal_c, x.external_c)
            .map_err(domain)?;

        Ok(HeatBalance {
            solar_w: sun.solar_w,
            albedo_w: sun.albedo_w,
            planet_ir_w,
            space_loss_w,
            exchange_w,
            heater_w,
        })
    }

    /// Heat terms using the heater state recorded for time `t`.
    pub fn logged_heat_balance(&self, t: f64, x: &NodeTemperatures) -> SimResult<HeatBalance> {
        let heater_w = self.heater_output_for(self.switch_log.state_at(t));
        self.heat_balance(t, x, heater_w)
    }

    /// `[dT1/dt, dT2/dt]` (K/s) with the currently held heater output.
    pub fn derivative(&self, t: f64, x: &NodeTemperatures) -> SimResult<NodeTemperatures> {
        let balance = self.heat_balance(t, x, self.heater_output_w())?;
        let rate = NodeTemperatures {
            internal_c: self.internal.temperature_rate(balance.net_internal_w()),
            external_c: self.external.temperature_rate(balance.net_external_w()),
        };
        for (v, what) in [
            (rate.internal_c, "internal node rate"),
            (rate.external_c, "external node rate"),
        ] {
            if !v.is_finite() {
                return Err(SimError::NonFinite {
                    what,
                    t,
                    state: x.as_array().to_vec(),
                });
            }
        }
        Ok(rate)
    }
}

/// Non-finite thermal terms carry the time and state they were evaluated at.
pub(crate) fn numeric_domain(e: ThermalError, t: f64, x: &NodeTemperatures) -> SimError {
    match e {
        ThermalError::NonFinite { what, .. } => SimError::NonFinite {
            what,
            t,
            state: x.as_array().to_vec(),
        },
        other => SimError::Thermal(other),
    }
}

impl TransientModel for CubeSatModel {
    type State = NodeTemperatures;

    fn initial_state(&self) -> Self::State {
        self.initial
    }

    fn rhs(&self, t: f64, x: &Self::State) -> SimResult<Self::State> {
        // Explicit stages can undershoot when dt is too large for the shell.
        if celsius_to_kelvin(x.internal_c) < 0.0 || celsius_to_kelvin(x.external_c) < 0.0 {
            return Err(SimError::Retryable {
                message: format!(
                    "stage temperature below absolute zero at t = {t} s: {:?}",
                    x.as_array()
                ),
            });
        }
        self.derivative(t, x)
    }

    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State {
        NodeTemperatures {
            internal_c: a.internal_c + b.internal_c,
            external_c: a.external_c + b.external_c,
        }
    }

    fn scale(&self, a: &Self::State, scale: f64) -> Self::State {
        NodeTemperatures {
            internal_c: a.internal_c * scale,
            external_c: a.external_c * scale,
        }
    }

    fn reset(&mut self, t0: f64) {
        let initial = self
            .heater
            .as_ref()
            .map_or(HeaterState::default(), |h| h.initial);
        self.heater_state = initial;
        self.switch_log = SwitchLog::new(t0, initial.switch);
        self.clock = self
            .heater
            .as_ref()
            .and_then(|h| h.sample)
            .map(|config| SampleClock::new(config, t0));
    }

    fn sample_controls(&mut self, t: f64, x: &Self::State) -> SimResult<()> {
        let Some(heater) = self.heater.as_ref() else {
            return Ok(());
        };
        if let Some(clock) = self.clock.as_mut() {
            if !clock.is_due(t) {
                return Ok(());
            }
            clock.advance(t);
        }

        let (next, heater_w) = heater.relay.update(&self.heater_state, x.internal_c);
        if next != self.heater_state {
            debug!(
                t,
                internal_c = x.internal_c,
                state = ?next.switch,
                heater_w,
                "heater switched"
            );
            self.switch_log.push(t, next.switch);
        }
        self.heater_state = next;
        Ok(())
    }

    fn check_state(&self, t: f64, x: &Self::State) -> SimResult<()> {
        if !(x.internal_c.is_finite() && x.external_c.is_finite()) {
            return Err(SimError::NonFinite {
                what: "node temperature",
                t,
                state: x.as_array().to_vec(),
            });
        }
        if celsius_to_kelvin(x.internal_c) < 0.0 || celsius_to_kelvin(x.external_c) < 0.0 {
            return Err(SimError::Retryable {
                message: format!(
                    "temperature below absolute zero at t = {t} s: {:?}",
                    x.as_array()
                ),
            });
        }
        Ok(())
    }
}
