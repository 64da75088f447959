//! Modem configuration
//!
//! MDMCFG2 packs four independent settings into one byte. The device handle
//! keeps the last written value of each field and every setter rewrites the
//! whole register from them, so changing one field leaves the other three
//! as they were. The stored fields are only updated once the register write
//! went through.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

use crate::device::Device;
use crate::error::Error;
use crate::registers::{
    Frequency, FrontEndTx, ModemConfig2, ModulationType, SyncMode, SyncWord,
};

impl<SPI, CS, READY, D, SpiE, PinE> Device<SPI, CS, READY, D>
where
    SPI: SpiBus<u8, Error = SpiE>,
    CS: OutputPin<Error = PinE>,
    READY: InputPin<Error = PinE>,
    D: DelayNs,
{
    /// MDMCFG2 fields as last written through this handle
    pub fn modem_config(&self) -> ModemConfig2 {
        self.modem
    }

    fn commit_modem(&mut self, modem: ModemConfig2) -> Result<(), Error<SpiE, PinE>> {
        self.write_register(modem)?;
        self.modem = modem;

        #[cfg(feature = "defmt")]
        defmt::debug!("MDMCFG2 = {=u8:#04x}", modem.bits());

        Ok(())
    }

    /// Selects the modulation format.
    ///
    /// Writes MDMCFG2, then points FREND0 at the PA table entry the format
    /// uses: entry 1 for OOK, entry 0 for everything else.
    pub fn set_modulation_type(
        &mut self,
        modulation: ModulationType,
    ) -> Result<(), Error<SpiE, PinE>> {
        self.commit_modem(ModemConfig2 {
            modulation,
            ..self.modem
        })?;

        self.write_register(FrontEndTx::for_modulation(modulation))
    }

    /// Selects the modulation format by name: "2FSK", "GFSK", "OOK", "4FSK"
    /// or "MSK".
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - Unknown name, nothing is written
    pub fn set_modulation(&mut self, name: &str) -> Result<(), Error<SpiE, PinE>> {
        let modulation = name.parse::<ModulationType>()?;
        self.set_modulation_type(modulation)
    }

    pub fn set_sync_mode(&mut self, sync_mode: SyncMode) -> Result<(), Error<SpiE, PinE>> {
        self.commit_modem(ModemConfig2 {
            sync_mode,
            ..self.modem
        })
    }

    /// Selects the sync mode by its MDMCFG2.SYNC_MODE value (0 to 7).
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - Selector out of range, nothing is written
    pub fn set_sync_mode_raw(&mut self, selector: u8) -> Result<(), Error<SpiE, PinE>> {
        let sync_mode = SyncMode::try_from(selector)?;
        self.set_sync_mode(sync_mode)
    }

    pub fn set_manchester(&mut self, enabled: bool) -> Result<(), Error<SpiE, PinE>> {
        self.commit_modem(ModemConfig2 {
            manchester: enabled,
            ..self.modem
        })
    }

    /// Sets MDMCFG2.DEM_DCFILT_OFF. `true` disables the DC blocking filter.
    pub fn set_dc_filter_off(&mut self, off: bool) -> Result<(), Error<SpiE, PinE>> {
        self.commit_modem(ModemConfig2 {
            dc_filter_off: off,
            ..self.modem
        })
    }

    /// Sets the carrier frequency in MHz.
    ///
    /// The frequency word is computed from `Config::crystal_hz` and written
    /// to FREQ2..FREQ0 in one burst.
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - Not a positive finite frequency, or too
    ///   high for the 24-bit word. Nothing is written.
    pub fn set_frequency(&mut self, mhz: f64) -> Result<(), Error<SpiE, PinE>> {
        let frequency = Frequency::from_mhz(mhz, self.config.crystal_hz)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("FREQ = {=u32:#08x}", frequency.word());

        self.write_register(frequency)
    }

    /// Reads back the carrier frequency in MHz.
    pub fn frequency(&mut self) -> Result<f64, Error<SpiE, PinE>> {
        let frequency: Frequency = self.read_register()?;
        Ok(frequency.to_mhz(self.config.crystal_hz))
    }

    /// Writes SYNC1 (high byte) and SYNC0 (low byte).
    pub fn set_sync_word(&mut self, word: u16) -> Result<(), Error<SpiE, PinE>> {
        self.write_register(SyncWord { word })
    }
}
