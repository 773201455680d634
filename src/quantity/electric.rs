quantity!(Volts, suffix: "V", precision: 3);
quantity!(Milliohms, suffix: "mΩ", precision: 2);
